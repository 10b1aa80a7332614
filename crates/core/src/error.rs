//! Error types for the core pipeline

use crate::corpus::CorpusLabel;
use thiserror::Error;

/// Core pipeline errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("{label} extraction yielded no usable responses")]
    EmptyExtraction { label: CorpusLabel },

    #[error("{label} corpus has {actual} responses, need at least {required}")]
    MinimumNotMet {
        label: CorpusLabel,
        actual: usize,
        required: usize,
    },

    #[error("below minimum of {required} responses: yahoo has {yahoo_actual}, llm has {llm_actual}")]
    BelowMinimum {
        yahoo_actual: usize,
        llm_actual: usize,
        required: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("extraction error: {0}")]
    Extract(#[from] corpusprep_extract::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
