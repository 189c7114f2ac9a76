use crate::domain::{CommandRunner, FilePicker};
use crate::infra::command_line::CommandLine;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Graphical file chooser backed by `zenity --file-selection`.
///
/// Zenity exits 1 when the dialog is dismissed, which maps to `None`.
#[derive(Debug)]
pub struct ZenityPicker {
    runner: Arc<dyn CommandRunner>,
}

impl ZenityPicker {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn choose(&self, command: CommandLine) -> Option<PathBuf> {
        match self.runner.run(&command) {
            Ok(output) if output.success() => {
                let path = output.stdout.trim();
                (!path.is_empty()).then(|| PathBuf::from(path))
            }
            Ok(output) => {
                debug!("file dialog dismissed (status {:?})", output.status);
                None
            }
            Err(e) => {
                warn!("file dialog unavailable: {}", e);
                None
            }
        }
    }
}

impl FilePicker for ZenityPicker {
    fn pick_open(&self, title: &str) -> Option<PathBuf> {
        self.choose(
            CommandLine::new("zenity")
                .arg("--file-selection")
                .arg(format!("--title={title}")),
        )
    }

    fn pick_save(&self, title: &str, suggested: &Path) -> Option<PathBuf> {
        self.choose(
            CommandLine::new("zenity")
                .args(["--file-selection", "--save", "--confirm-overwrite"])
                .arg(format!("--title={title}"))
                .arg(format!("--filename={}", suggested.to_string_lossy())),
        )
    }
}

/// A picker whose answer is already known, e.g. a path given on the command line
#[derive(Debug, Clone, Default)]
pub struct PresetPicker {
    path: Option<PathBuf>,
}

impl PresetPicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl FilePicker for PresetPicker {
    fn pick_open(&self, _title: &str) -> Option<PathBuf> {
        self.path.clone()
    }

    fn pick_save(&self, _title: &str, _suggested: &Path) -> Option<PathBuf> {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProcessOutput;
    use crate::test_support::MockRunner;

    #[test]
    fn zenity_selection_is_returned() {
        let mock = Arc::new(MockRunner::new());
        mock.respond(
            "zenity",
            ProcessOutput {
                status: Some(0),
                stdout: "/home/me/alpine.tar\n".into(),
                stderr: String::new(),
            },
        );

        let picker = ZenityPicker::new(mock.clone());
        assert_eq!(
            picker.pick_open("Import image"),
            Some(PathBuf::from("/home/me/alpine.tar"))
        );
        assert!(mock.get_commands()[0].contains("--file-selection"));
    }

    #[test]
    fn zenity_dismissal_is_none() {
        let mock = Arc::new(MockRunner::new());
        mock.respond(
            "zenity",
            ProcessOutput {
                status: Some(1),
                ..Default::default()
            },
        );

        let picker = ZenityPicker::new(mock);
        assert_eq!(
            picker.pick_save("Export image", Path::new("alpine.tar")),
            None
        );
    }

    #[test]
    fn preset_picker_returns_its_path() {
        let picker = PresetPicker::new(Some(PathBuf::from("/tmp/x.tar")));
        assert_eq!(picker.pick_open("t"), Some(PathBuf::from("/tmp/x.tar")));
        assert_eq!(PresetPicker::default().pick_open("t"), None);
    }
}
