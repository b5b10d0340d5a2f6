use crate::error::CommandError;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Details used when a command fails without printing anything.
pub const UNKNOWN_ERROR: &str = "Unknown error.";

/// What a finished child process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Interleaved stdout and stderr bytes.
    pub output: Vec<u8>,
}

/// Blocking process launcher. Runs on tokio's blocking pool, never on the caller's task.
///
/// An `Err` means the process could not be started or observed.
pub trait Launcher: Send + Sync + 'static {
    fn launch(&self, command: &str, workdir: Option<&Path>) -> io::Result<RawOutput>;
}

/// Runs commands through `<shell> -lc <command>` with stdout and stderr sharing one pipe.
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    shell: PathBuf,
}

impl ShellLauncher {
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Launcher for ShellLauncher {
    fn launch(&self, command: &str, workdir: Option<&Path>) -> io::Result<RawOutput> {
        let (mut reader, writer) = io::pipe()?;
        let writer_err = writer.try_clone()?;

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-lc")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(writer_err);
        if let Some(dir) = workdir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn()?;
        // The builder still owns both write ends; EOF only arrives once they are gone.
        drop(cmd);

        let mut output = Vec::new();
        let read = reader.read_to_end(&mut output);
        let status = child.wait()?;
        read?;

        Ok(RawOutput {
            exit_code: status.code(),
            output,
        })
    }
}

/// Asynchronous front end over a [`Launcher`]. Cheap to clone; holds no results.
#[derive(Clone)]
pub struct Executor {
    launcher: Arc<dyn Launcher>,
    workdir: Option<PathBuf>,
}

impl Executor {
    pub fn new(launcher: impl Launcher) -> Self {
        Self {
            launcher: Arc::new(launcher),
            workdir: None,
        }
    }

    /// Executor backed by a [`ShellLauncher`] for the given shell binary.
    pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
        Self::new(ShellLauncher::new(shell))
    }

    /// Default working directory for every command run through this executor.
    pub fn with_workdir(mut self, dir: Option<PathBuf>) -> Self {
        self.workdir = dir;
        self
    }

    /// Run one command in the executor's default working directory.
    pub async fn execute(&self, command: &str) -> Result<String, CommandError> {
        self.execute_in(command, self.workdir.as_deref()).await
    }

    /// Run one command, trimming it first.
    ///
    /// - Blank input fails with [`CommandError::EmptyCommand`] and spawns nothing.
    /// - Exit code 0 yields the captured output.
    /// - Any other exit yields [`CommandError::ExecutionFailed`] carrying the output,
    ///   or [`UNKNOWN_ERROR`] when there was none.
    /// - A launch failure yields [`CommandError::SpawnFailed`].
    ///
    /// There is no timeout: a child that never exits keeps this future pending.
    pub async fn execute_in(
        &self,
        command: &str,
        workdir: Option<&Path>,
    ) -> Result<String, CommandError> {
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return Err(CommandError::EmptyCommand);
        }

        let launcher = Arc::clone(&self.launcher);
        let owned = trimmed.to_string();
        let dir = workdir.map(Path::to_path_buf);
        debug!(command = %owned, workdir = ?dir, "spawning command");

        let joined =
            tokio::task::spawn_blocking(move || launcher.launch(&owned, dir.as_deref())).await;
        let raw = match joined {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!(command = %trimmed, error = %e, "failed to launch command");
                return Err(CommandError::SpawnFailed(e.to_string()));
            }
            Err(e) => {
                warn!(command = %trimmed, error = %e, "launcher task aborted");
                return Err(CommandError::SpawnFailed(e.to_string()));
            }
        };

        info!(
            command = %trimmed,
            exit_code = ?raw.exit_code,
            bytes = raw.output.len(),
            "command finished"
        );
        interpret(raw)
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("workdir", &self.workdir)
            .finish_non_exhaustive()
    }
}

/// Turn a finished process into an outcome. Invalid UTF-8 is decoded lossily.
fn interpret(raw: RawOutput) -> Result<String, CommandError> {
    let text = String::from_utf8_lossy(&raw.output).into_owned();
    match raw.exit_code {
        Some(0) => Ok(text),
        _ if text.is_empty() => Err(CommandError::ExecutionFailed(UNKNOWN_ERROR.to_string())),
        _ => Err(CommandError::ExecutionFailed(text)),
    }
}
