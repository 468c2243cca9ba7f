//! Error types for meshorbit

use std::time::Duration;
use thiserror::Error;

/// Main error type for meshorbit operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Mesh has no vertices")]
    EmptyMesh,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Render failure: {0}")]
    Render(String),

    #[error("Render of pose {pose} took {elapsed:?} (limit {limit:?})")]
    RenderTimeout {
        pose: usize,
        elapsed: Duration,
        limit: Duration,
    },
}

/// Result type alias for meshorbit operations
pub type Result<T> = std::result::Result<T, Error>;
