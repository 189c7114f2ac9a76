use super::traits::ProcessOutput;
use serde::Serialize;
use std::fmt;

/// Mutating operations whose result goes through the outcome classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateContainer,
    StartContainer,
    StopContainer,
    DeleteContainer,
    PullImage,
    DeleteImage,
    ImportImage,
    ExportImage,
    ExportApp,
    UnshareApp,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CreateContainer => "create container",
            Self::StartContainer => "start container",
            Self::StopContainer => "stop container",
            Self::DeleteContainer => "delete container",
            Self::PullImage => "pull image",
            Self::DeleteImage => "delete image",
            Self::ImportImage => "import image",
            Self::ExportImage => "export image",
            Self::ExportApp => "export app",
            Self::UnshareApp => "unshare app",
        };
        f.write_str(label)
    }
}

/// What happened when an operation was attempted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The user backed out before any process was spawned
    Cancelled,
    Completed(ProcessOutput),
}

/// Terminal result of one operation as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CommandOutcome {
    Success,
    Cancelled,
    Failed { message: String },
}

impl CommandOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "ok"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}
