use serde::{Deserialize, Serialize};
use std::fmt;
use time::{OffsetDateTime, UtcOffset};
use uuid::Uuid;

/// Reconnaissance category that decides which command template is used.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanKind {
    #[serde(rename = "whois")]
    Whois,
    #[serde(rename = "dns")]
    Dns,
    #[serde(rename = "fullOSINT")]
    FullOsint,
}

impl ScanKind {
    /// Human-readable label, used in reports and the CSV `scan_type` column.
    pub fn label(self) -> &'static str {
        match self {
            ScanKind::Whois => "WHOIS",
            ScanKind::Dns => "DNS / Network",
            ScanKind::FullOsint => "R.I.S.K OSINT",
        }
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One resolved unit of work: what to run and how to label it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStep {
    pub kind: ScanKind,
    pub title: String,
    pub command: String,
}

/// Captured outcome of a single external command run against a target.
///
/// Fields are private so a record cannot change after construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    id: Uuid,
    target: String,
    scan_type: ScanKind,
    title: String,
    command: String,
    output: String,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
}

impl ResultRecord {
    /// Build a record stamped with a fresh id and the current instant.
    pub fn new(
        target: impl Into<String>,
        scan_type: ScanKind,
        title: impl Into<String>,
        command: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self::with_parts(
            Uuid::new_v4(),
            target,
            scan_type,
            title,
            command,
            output,
            OffsetDateTime::now_utc(),
        )
    }

    /// Record for a completed step, keeping its kind, title and command.
    pub fn from_step(target: impl Into<String>, step: &ScanStep, output: impl Into<String>) -> Self {
        Self::new(target, step.kind, step.title.clone(), step.command.clone(), output)
    }

    /// Build a record from explicit parts. The timestamp is stored in UTC.
    pub fn with_parts(
        id: Uuid,
        target: impl Into<String>,
        scan_type: ScanKind,
        title: impl Into<String>,
        command: impl Into<String>,
        output: impl Into<String>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            target: target.into(),
            scan_type,
            title: title.into(),
            command: command.into(),
            output: output.into(),
            timestamp: timestamp.to_offset(UtcOffset::UTC),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn scan_type(&self) -> ScanKind {
        self.scan_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

/// Latest single-command status, observed by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionState {
    pub is_running: bool,
    pub last_output: String,
    pub last_error: Option<String>,
}
