//! Core corpus pipeline
//!
//! This crate owns the corpus model and the decision logic of the run:
//! size validation, balancing two corpora to a common length, atomic
//! persistence, and the orchestrator that sequences the stages.

pub mod balance;
pub mod corpus;
pub mod error;
pub mod persist;
pub mod pipeline;
pub mod validate;

pub use corpus::{Corpus, CorpusLabel};
pub use error::{Error, Result};
pub use pipeline::{
    NoopObserver, PipelineConfig, PipelineObserver, PipelineOrchestrator, PipelineOutcome,
    RunPaths, Stage,
};
pub use validate::{ValidationConfig, DEFAULT_MIN_COUNT};
