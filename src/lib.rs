pub mod domain;
pub mod infra;
pub mod parsers;
pub mod services;

// Mock adapters shared by unit and integration tests
pub mod test_support;

pub use domain::{
    CommandOutcome, ContainerRecord, Error, ImageRecord, Operation, PackageManager, Result,
    SearchResultRecord, SharedAppRecord,
};
pub use infra::{CommandBuilder, CommandLine, SystemRunner};
pub use services::{AppService, ContainerService, ImageService, SystemService, classify};
