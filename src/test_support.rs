use crate::domain::{CommandRunner, Error, FilePicker, ProcessOutput, Result};
use crate::infra::CommandLine;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted stand-in for the host's processes.
///
/// Responses are matched by substring against the command's shell rendering; the most recently
/// registered match wins. Unmatched commands succeed with empty output.
#[derive(Debug)]
pub struct MockRunner {
    responses: RwLock<Vec<(String, ProcessOutput)>>,
    commands: RwLock<Vec<String>>,
    spawned: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
    unavailable: RwLock<HashSet<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(Vec::new()),
            commands: RwLock::new(Vec::new()),
            spawned: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
            unavailable: RwLock::new(HashSet::new()),
        }
    }

    pub fn respond(&self, pattern: &str, output: ProcessOutput) {
        self.responses
            .write()
            .unwrap()
            .push((pattern.to_string(), output));
    }

    pub fn respond_ok(&self, pattern: &str, stdout: &str) {
        self.respond(
            pattern,
            ProcessOutput {
                status: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    pub fn respond_err(&self, pattern: &str, status: i32, stderr: &str) {
        self.respond(
            pattern,
            ProcessOutput {
                status: Some(status),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
    }

    /// Make any command containing `pattern` fail to spawn
    pub fn set_fail_on(&self, pattern: &str) {
        *self.fail_on.write().unwrap() = Some(pattern.to_string());
    }

    pub fn set_unavailable(&self, binaries: &[&str]) {
        let mut unavailable = self.unavailable.write().unwrap();
        unavailable.extend(binaries.iter().map(|b| b.to_string()));
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn get_spawned(&self) -> Vec<String> {
        self.spawned.read().unwrap().clone()
    }

    fn check_fail(&self, program: &str, rendered: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if rendered.contains(fail_on.as_str()) {
                return Err(Error::Spawn {
                    program: program.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock failure"),
                });
            }
        }
        Ok(())
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &CommandLine) -> Result<ProcessOutput> {
        let rendered = command.to_shell_string();
        self.commands.write().unwrap().push(rendered.clone());
        self.check_fail(&command.program, &rendered)?;

        let response = self
            .responses
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|(pattern, _)| rendered.contains(pattern.as_str()))
            .map(|(_, output)| output.clone());

        Ok(response.unwrap_or(ProcessOutput {
            status: Some(0),
            ..Default::default()
        }))
    }

    fn spawn_detached(&self, command: &CommandLine) -> Result<()> {
        let rendered = command.to_shell_string();
        self.spawned.write().unwrap().push(rendered.clone());
        self.check_fail(&command.program, &rendered)
    }

    fn is_command_available(&self, cmd: &str) -> bool {
        !self.unavailable.read().unwrap().contains(cmd)
    }
}

/// File picker with a canned answer that counts how often it was asked
#[derive(Debug, Default)]
pub struct MockPicker {
    answer: Option<PathBuf>,
    calls: AtomicUsize,
}

impl MockPicker {
    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn choosing(path: impl Into<PathBuf>) -> Self {
        Self {
            answer: Some(path.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FilePicker for MockPicker {
    fn pick_open(&self, _title: &str) -> Option<PathBuf> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }

    fn pick_save(&self, _title: &str, _suggested: &Path) -> Option<PathBuf> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}
