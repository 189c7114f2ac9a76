pub mod command_line;
pub mod config;
pub mod detection;
pub mod file_picker;
pub mod process_runner;

pub use command_line::{CommandBuilder, CommandLine, build_create_command};
pub use detection::{DistroInfo, RuntimeKind, Terminal};
pub use file_picker::{PresetPicker, ZenityPicker};
pub use process_runner::{DryRunRunner, SystemRunner};
