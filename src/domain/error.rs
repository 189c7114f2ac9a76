//! Error types for the distrobox front-end core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Required tool not found: {0}")]
    ExternalToolMissing(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed: {message}")]
    Invocation { program: String, message: String },

    #[error("Unparseable output: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
