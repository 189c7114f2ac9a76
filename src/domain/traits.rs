use super::error::Result;
use crate::infra::command_line::CommandLine;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Captured result of one finished external process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Trait for running external commands to completion
pub trait CommandRunner: Send + Sync + Debug {
    /// Run the command and capture stdout/stderr in full.
    ///
    /// A non-zero exit is not an error here; only a failure to spawn is.
    fn run(&self, command: &CommandLine) -> Result<ProcessOutput>;

    /// Start the command without waiting for it (terminal windows)
    fn spawn_detached(&self, command: &CommandLine) -> Result<()>;

    /// Check if a binary is reachable on PATH
    fn is_command_available(&self, cmd: &str) -> bool;
}

/// Host-side file chooser used by image import/export.
///
/// `None` means the user dismissed the dialog.
pub trait FilePicker: Send + Sync + Debug {
    fn pick_open(&self, title: &str) -> Option<PathBuf>;

    fn pick_save(&self, title: &str, suggested: &Path) -> Option<PathBuf>;
}
