//! Corpus size validation
//!
//! One configurable policy covers both sizing passes of the run: the
//! uncapped "is there enough data" check and the capped re-cut used
//! after the balance target is known.

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum viable sample per corpus.
pub const DEFAULT_MIN_COUNT: usize = 15;

/// Sizing policy for a validated corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Lower bound enforced on the kept count.
    pub min_count: usize,
    /// Optional truncation ceiling, applied before the minimum check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_COUNT,
            max_count: None,
        }
    }
}

/// Cap, then size-check a corpus.
///
/// Truncation keeps the first `max_count` entries. Earlier entries are
/// not better; the cap is deterministic but order-dependent.
pub fn validate(mut corpus: Corpus, config: &ValidationConfig) -> Result<Corpus> {
    if let Some(max) = config.max_count {
        if corpus.len() > max {
            debug!("capping {} corpus from {} to {}", corpus.label, corpus.len(), max);
            corpus.truncate(max);
        }
    }

    if corpus.len() < config.min_count {
        return Err(Error::MinimumNotMet {
            label: corpus.label,
            actual: corpus.len(),
            required: config.min_count,
        });
    }

    Ok(corpus)
}
