use crate::error::ExportError;
use crate::export;
use std::path::{Path, PathBuf};

const FALLBACK_SHELLS: &[&str] = &["/bin/zsh", "/bin/sh"];

/// Runtime settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Shell invoked as `<shell> -lc <command>`.
    pub shell: PathBuf,
    /// Directory that receives per-target export folders.
    pub export_root: PathBuf,
    /// Working directory for spawned commands; inherited when `None`.
    pub workdir: Option<PathBuf>,
}

impl Settings {
    /// Fill unset values from the environment: `$SHELL` and the home directory.
    pub fn resolve(
        shell: Option<PathBuf>,
        export_root: Option<PathBuf>,
        workdir: Option<PathBuf>,
    ) -> Result<Self, ExportError> {
        let export_root = match export_root {
            Some(p) => p,
            None => export::default_export_root()?,
        };
        Ok(Self {
            shell: shell.unwrap_or_else(default_shell),
            export_root,
            workdir,
        })
    }
}

/// `$SHELL` if set, otherwise the first of zsh or sh that exists.
pub fn default_shell() -> PathBuf {
    if let Some(shell) = std::env::var_os("SHELL").filter(|s| !s.is_empty()) {
        return PathBuf::from(shell);
    }
    FALLBACK_SHELLS
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .unwrap_or_else(|| Path::new("/bin/sh"))
        .to_path_buf()
}
