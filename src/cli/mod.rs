pub mod apps;
pub mod containers;
pub mod context;
pub mod doctor;
pub mod images;

pub use apps::AppsCommand;
pub use containers::ContainersCommand;
pub use context::Context;
pub use images::ImagesCommand;

use anyhow::{Result, bail};
use distrodeck::domain::CommandOutcome;
use serde::Serialize;

/// One line per outcome; a failure becomes the process error so the exit code reflects it
pub fn report(action: &str, outcome: CommandOutcome) -> Result<()> {
    match outcome {
        CommandOutcome::Success => {
            println!("✅ {action}");
            Ok(())
        }
        CommandOutcome::Cancelled => {
            println!("⚠️  {action}: cancelado");
            Ok(())
        }
        CommandOutcome::Failed { message } => bail!("{action}: {message}"),
    }
}

pub fn print_json<T: Serialize>(records: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}
