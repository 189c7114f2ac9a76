use crate::domain::{CommandRunner, Error, ProcessOutput, Result};
use crate::infra::command_line::CommandLine;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Runs commands on the host with `std::process::Command`
#[derive(Debug)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> Result<ProcessOutput> {
        debug!("running {}", command);

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| Error::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let result = ProcessOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!("{} exited with {:?}", command.program, result.status);
        Ok(result)
    }

    fn spawn_detached(&self, command: &CommandLine) -> Result<()> {
        debug!("spawning {}", command);

        Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|source| Error::Spawn {
                program: command.program.clone(),
                source,
            })
    }

    fn is_command_available(&self, cmd: &str) -> bool {
        which::which(cmd).is_ok()
    }
}

/// Prints each command instead of running it; every command "succeeds" with empty output
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&self, command: &CommandLine) -> Result<ProcessOutput> {
        info!("[dry-run] {}", command);
        Ok(ProcessOutput {
            status: Some(0),
            ..Default::default()
        })
    }

    fn spawn_detached(&self, command: &CommandLine) -> Result<()> {
        info!("[dry-run] {} &", command);
        Ok(())
    }

    fn is_command_available(&self, cmd: &str) -> bool {
        which::which(cmd).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let runner = SystemRunner::new();
        let err = runner
            .run(&CommandLine::new("distrodeck-definitely-missing-binary"))
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
        assert!(!runner.is_command_available("distrodeck-definitely-missing-binary"));
    }

    #[test]
    fn dry_run_never_fails() {
        let runner = DryRunRunner;
        let output = runner
            .run(&CommandLine::new("distrodeck-definitely-missing-binary").arg("--x"))
            .unwrap();
        assert!(output.success());
        assert!(output.stdout.is_empty());
        assert!(
            runner
                .spawn_detached(&CommandLine::new("distrodeck-definitely-missing-binary"))
                .is_ok()
        );
    }
}
