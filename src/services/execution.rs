use super::classifier::classify;
use crate::domain::{CommandOutcome, CommandRunner, Error, Invocation, Operation, Result};
use crate::infra::CommandLine;
use tracing::{debug, warn};

/// Run a mutating command and classify what happened.
///
/// Never errors: an unbuildable command or a process that cannot be spawned is a `Failed`
/// outcome with the error text.
pub(crate) fn run_operation(
    runner: &dyn CommandRunner,
    operation: Operation,
    command: Result<CommandLine>,
) -> CommandOutcome {
    let command = match command {
        Ok(command) => command,
        Err(e) => {
            warn!("{operation} rejected: {e}");
            return CommandOutcome::failed(e.to_string());
        }
    };

    debug!("{operation}: {command}");
    let outcome = match runner.run(&command) {
        Ok(output) => classify(operation, &Invocation::Completed(output)),
        Err(e) => CommandOutcome::failed(e.to_string()),
    };

    if let Some(message) = outcome.error_message() {
        warn!("{operation} failed: {message}");
    }
    outcome
}

/// Run a listing command and hand back its stdout; a non-zero exit is an error
pub(crate) fn run_query(runner: &dyn CommandRunner, command: &CommandLine) -> Result<String> {
    debug!("query: {command}");
    let output = runner.run(command)?;

    if !output.success() {
        let stderr = output.stderr.trim();
        let message = if stderr.is_empty() {
            format!("exit status {:?}", output.status)
        } else {
            stderr.to_string()
        };
        return Err(Error::Invocation {
            program: command.program.clone(),
            message,
        });
    }

    Ok(output.stdout)
}
