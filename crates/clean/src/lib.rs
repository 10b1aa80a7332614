//! Text normalization for answer corpora
//!
//! This crate provides the single cleaning function applied to every
//! raw answer candidate before it can enter a corpus.

pub mod normalizer;

pub use normalizer::TextNormalizer;
