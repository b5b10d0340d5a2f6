use crate::catalog;
use crate::error::CommandError;
use crate::executor::Executor;
use crate::store::ResultStore;
use crate::types::{ResultRecord, ScanStep};
use tracing::info;
use uuid::Uuid;

/// Where a chain run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    NotStarted,
    RunningStep(usize),
    Done,
}

/// Passed to the per-step callback right after a step's record is stored.
#[derive(Debug, Clone, Copy)]
pub struct StepProgress<'a> {
    pub index: usize,
    pub total: usize,
    pub record: &'a ResultRecord,
    /// The executor's raw result for this step.
    pub outcome: &'a Result<String, CommandError>,
}

/// Text stored as a record's output: the captured output on success, the error text otherwise.
pub fn recorded_output(outcome: &Result<String, CommandError>) -> String {
    match outcome {
        Ok(out) => out.clone(),
        Err(e) => e.to_string(),
    }
}

/// A sequence of scan steps run one after another against a single target.
#[derive(Debug, Clone)]
pub struct Chain {
    target: String,
    steps: Vec<ScanStep>,
    state: ChainState,
}

impl Chain {
    /// The standard WHOIS, DNS, Nmap chain for `target`.
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        let steps = catalog::chain_plan(&target);
        Self::with_steps(target, steps)
    }

    pub fn with_steps(target: impl Into<String>, steps: Vec<ScanStep>) -> Self {
        Self {
            target: target.into(),
            steps,
            state: ChainState::NotStarted,
        }
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    pub fn steps(&self) -> &[ScanStep] {
        &self.steps
    }

    /// Run every step in order, appending one record per step to `store`.
    ///
    /// Step `i + 1` starts only after step `i` has finished and been stored. A failing
    /// step records its error text and the chain moves on. Running a chain that is
    /// already `Done` is a no-op.
    pub async fn run<F>(
        &mut self,
        executor: &Executor,
        store: &mut ResultStore,
        mut on_step: F,
    ) -> Vec<Uuid>
    where
        F: FnMut(StepProgress<'_>),
    {
        let total = self.steps.len();
        let mut ids = Vec::with_capacity(total);

        if self.state == ChainState::NotStarted {
            self.state = if total == 0 {
                ChainState::Done
            } else {
                ChainState::RunningStep(0)
            };
        }

        while let ChainState::RunningStep(index) = self.state {
            let step = &self.steps[index];
            info!(target_host = %self.target, step = index + 1, total, title = %step.title, "running chain step");

            let outcome = executor.execute(&step.command).await;
            let output = recorded_output(&outcome);
            let record = store.append(ResultRecord::from_step(self.target.clone(), step, output));
            ids.push(record.id());
            on_step(StepProgress {
                index,
                total,
                record,
                outcome: &outcome,
            });

            self.state = if index + 1 < total {
                ChainState::RunningStep(index + 1)
            } else {
                ChainState::Done
            };
        }

        ids
    }
}
