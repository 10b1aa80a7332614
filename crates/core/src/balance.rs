//! Corpus pair balancing
//!
//! Downstream frequency comparisons assume equal sample sizes, so both
//! corpora are cut to the smaller of the two counts before persistence.

use crate::corpus::Corpus;
use tracing::debug;

/// Truncate both corpora, from the front, to the smaller of the two
/// counts. Infallible once the inputs are validated.
pub fn balance(mut a: Corpus, mut b: Corpus) -> (Corpus, Corpus) {
    let target = a.len().min(b.len());
    debug!(
        "balancing {} ({}) and {} ({}) to {}",
        a.label,
        a.len(),
        b.label,
        b.len(),
        target
    );
    a.truncate(target);
    b.truncate(target);
    (a, b)
}
