mod app_service;
pub mod classifier;
mod container_service;
mod execution;
mod image_service;
mod system_service;

pub use app_service::AppService;
pub use classifier::classify;
pub use container_service::ContainerService;
pub use image_service::ImageService;
pub use system_service::{DependencyReport, SystemService};
