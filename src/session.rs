//! Session controller: owns the result store and execution state, and exposes
//! the entry points a presentation layer drives.
//!
//! All mutation happens through `&mut Session`, so one session can never have two
//! commands in flight. Observers follow [`ExecutionState`] through a watch channel
//! obtained from [`Session::subscribe`].

use crate::chain::{recorded_output, Chain, StepProgress};
use crate::catalog;
use crate::config::Settings;
use crate::error::{CommandError, ExportError};
use crate::executor::{Executor, UNKNOWN_ERROR};
use crate::export;
use crate::store::ResultStore;
use crate::types::{ExecutionState, ResultRecord, ScanKind};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

pub struct Session {
    executor: Executor,
    export_root: PathBuf,
    store: ResultStore,
    state: watch::Sender<ExecutionState>,
    last_export: Vec<PathBuf>,
}

impl Session {
    pub fn new(executor: Executor, export_root: impl Into<PathBuf>) -> Self {
        let (state, _) = watch::channel(ExecutionState::default());
        Self {
            executor,
            export_root: export_root.into(),
            store: ResultStore::new(),
            state,
            last_export: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let executor =
            Executor::with_shell(settings.shell.clone()).with_workdir(settings.workdir.clone());
        Self::new(executor, settings.export_root.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<ExecutionState> {
        self.state.subscribe()
    }

    pub fn execution_state(&self) -> ExecutionState {
        self.state.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().is_running
    }

    pub fn export_root(&self) -> &Path {
        &self.export_root
    }

    /// Ad-hoc terminal-style command. Updates `last_output` / `last_error` only;
    /// nothing is added to the result store.
    pub async fn run_command(&mut self, command: &str) -> Result<String, CommandError> {
        if command.trim().is_empty() {
            let err = CommandError::EmptyCommand;
            self.state
                .send_modify(|s| s.last_error = Some(err.to_string()));
            return Err(err);
        }

        self.begin();
        let outcome = self.executor.execute(command).await;
        self.finish(&outcome);
        outcome
    }

    /// Run one catalog scan against `target` and store its record.
    pub async fn run_scan(&mut self, kind: ScanKind, target: &str) -> &ResultRecord {
        let target = target.trim();
        let step = catalog::resolve(kind, target);
        info!(kind = %kind, target_host = %target, "running scan");

        self.begin();
        let outcome = self.executor.execute(&step.command).await;
        self.finish(&outcome);

        self.store
            .append(ResultRecord::from_step(target, &step, recorded_output(&outcome)))
    }

    /// Run the full WHOIS, DNS, Nmap chain against `target`.
    ///
    /// `on_step` fires after each step's record has been stored and made active,
    /// and after `last_output` / `last_error` reflect that step. `is_running`
    /// stays set for the whole chain.
    pub async fn run_chain<F>(&mut self, target: &str, mut on_step: F) -> Vec<Uuid>
    where
        F: FnMut(StepProgress<'_>),
    {
        let mut chain = Chain::new(target.trim());
        self.begin();
        let state = &self.state;
        let ids = chain
            .run(&self.executor, &mut self.store, |p| {
                record_outcome(state, p.outcome, true);
                on_step(p);
            })
            .await;
        self.state.send_modify(|s| s.is_running = false);
        ids
    }

    /// Export every stored record, keyed by the first record's target.
    pub async fn export(&mut self) -> Result<Vec<PathBuf>, ExportError> {
        let Some(target) = self.store.records().first().map(|r| r.target().to_string()) else {
            return Ok(Vec::new());
        };
        let paths = export::export_all(&self.export_root, &target, self.store.records()).await?;
        self.last_export = paths.clone();
        Ok(paths)
    }

    pub fn last_export(&self) -> &[PathBuf] {
        &self.last_export
    }

    pub fn results(&self) -> &[ResultRecord] {
        self.store.records()
    }

    pub fn active(&self) -> Option<&ResultRecord> {
        self.store.active()
    }

    pub fn select(&mut self, id: Uuid) -> bool {
        self.store.select(id)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.is_running = true;
            s.last_error = None;
        });
    }

    fn finish(&self, outcome: &Result<String, CommandError>) {
        record_outcome(&self.state, outcome, false);
    }
}

/// Fold one command's result into the execution state.
///
/// `last_output` gets the captured output, including a failing command's (empty
/// when it printed nothing). A launch failure leaves `last_output` alone.
fn record_outcome(
    state: &watch::Sender<ExecutionState>,
    outcome: &Result<String, CommandError>,
    still_running: bool,
) {
    if let Err(e) = outcome {
        warn!(error = %e, "command did not succeed");
    }
    state.send_modify(|s| {
        s.is_running = still_running;
        match outcome {
            Ok(out) => {
                s.last_output = out.clone();
                s.last_error = None;
            }
            Err(e) => {
                if let CommandError::ExecutionFailed(details) = e {
                    s.last_output = if details == UNKNOWN_ERROR {
                        String::new()
                    } else {
                        details.clone()
                    };
                }
                s.last_error = Some(e.to_string());
            }
        }
    });
}
