use crate::domain::{CommandOutcome, Invocation, Operation, ProcessOutput};

const START_NOOP_MARKERS: &[&str] = &["already running", "setup complete"];
const STOP_NOOP_MARKERS: &[&str] = &["not running", "already stopped"];
const IMAGE_EXISTS_MARKER: &str = "already exists";

pub const IMAGE_EXISTS_MESSAGE: &str = "Image already exists.";

/// Map the raw result of an operation to the outcome shown to the user.
///
/// The first matching rule wins:
/// 1. nothing ran → `Cancelled`
/// 2. start reporting an already running or freshly set up container → `Success`
/// 3. stop of a container that is not running → `Success`
/// 4. import of an image that is already present → `Failed("Image already exists.")`
/// 5. exit status 0 → `Success`
/// 6. anything else → `Failed` with stderr, else stdout, else the exit status
pub fn classify(operation: Operation, invocation: &Invocation) -> CommandOutcome {
    let output = match invocation {
        Invocation::Cancelled => return CommandOutcome::Cancelled,
        Invocation::Completed(output) => output,
    };

    match operation {
        Operation::StartContainer if mentions_any(output, START_NOOP_MARKERS) => {
            return CommandOutcome::Success;
        }
        Operation::StopContainer if mentions_any(output, STOP_NOOP_MARKERS) => {
            return CommandOutcome::Success;
        }
        Operation::ImportImage if mentions_any(output, &[IMAGE_EXISTS_MARKER]) => {
            return CommandOutcome::failed(IMAGE_EXISTS_MESSAGE);
        }
        _ => {}
    }

    if output.success() {
        return CommandOutcome::Success;
    }

    CommandOutcome::failed(failure_message(operation, output))
}

fn mentions_any(output: &ProcessOutput, markers: &[&str]) -> bool {
    let stdout = output.stdout.to_lowercase();
    let stderr = output.stderr.to_lowercase();
    markers
        .iter()
        .any(|m| stdout.contains(m) || stderr.contains(m))
}

fn failure_message(operation: Operation, output: &ProcessOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }

    let stdout = output.stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }

    match output.status {
        Some(code) => format!("{operation} failed with exit status {code}"),
        None => format!("{operation} was terminated by a signal"),
    }
}
