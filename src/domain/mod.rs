mod app;
mod container;
pub mod error;
mod image;
mod outcome;
pub mod traits;

pub use app::{PackageManager, SearchResultRecord, SharedAppKind, SharedAppRecord};
pub use container::{
    ContainerRecord, ContainerStatus, ContainerSummary, CreateContainerRequest, HomeMode,
    InspectDetails,
};
pub use error::{Error, Result};
pub use image::{ImageRecord, ImageTableHeaders};
pub use outcome::{CommandOutcome, Invocation, Operation};
pub use traits::{CommandRunner, FilePicker, ProcessOutput};
