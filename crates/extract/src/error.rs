//! Error types for extraction

use thiserror::Error;

/// Extraction errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, Error>;
