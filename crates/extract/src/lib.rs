//! Source-specific answer extraction
//!
//! The two input corpora arrive in different, schema-free shapes: one
//! candidate answer per line, or a blob of quote-delimited spans with a
//! tabular fallback. Each extractor runs every candidate through the
//! text normalizer and keeps only non-trivial results.

pub mod error;
pub mod lines;
pub mod quoted;

pub use error::{Error, Result};
pub use lines::LineExtractor;
pub use quoted::QuotedSpanExtractor;

/// Cleaned responses at or below this length (in chars) are discarded as
/// noise: bare numbers, single words, fragments.
pub const MIN_RESPONSE_LEN: usize = 5;

/// Raw tabular fields at or below this length (in chars) are skipped by
/// the CSV fallback; long fields are likely free-text answers rather than
/// numeric ids or short labels. A heuristic tie-break, not a format
/// guarantee. Override per extractor if your data says otherwise.
pub const FREE_TEXT_FIELD_MIN_LEN: usize = 20;
