use crate::types::ResultRecord;
use uuid::Uuid;

/// Insertion-ordered, append-only collection of the session's results.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    records: Vec<ResultRecord>,
    active: Option<Uuid>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and make it the active one. Returns a reference to it.
    pub fn append(&mut self, record: ResultRecord) -> &ResultRecord {
        self.active = Some(record.id());
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn latest(&self) -> Option<&ResultRecord> {
        self.records.last()
    }

    pub fn get(&self, id: Uuid) -> Option<&ResultRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Point the active marker at `id`. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: Uuid) -> bool {
        if self.get(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// The selected record, falling back to the most recent one.
    pub fn active(&self) -> Option<&ResultRecord> {
        self.active
            .and_then(|id| self.get(id))
            .or_else(|| self.latest())
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.active = None;
    }
}
