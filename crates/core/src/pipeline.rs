//! Two-corpus cleaning pipeline orchestration
//!
//! Sequences extraction → validation → balancing → persistence for the
//! pair of corpora and reports a single pass/fail outcome. Progress
//! reporting goes through an observer so the pipeline itself stays a
//! pure transformation from inputs to two output files.

use crate::balance::balance;
use crate::corpus::{Corpus, CorpusLabel};
use crate::error::{Error, Result};
use crate::persist::write_corpus;
use crate::validate::{validate, ValidationConfig, DEFAULT_MIN_COUNT};
use corpusprep_extract::{
    LineExtractor, QuotedSpanExtractor, FREE_TEXT_FIELD_MIN_LEN, MIN_RESPONSE_LEN,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    Validating,
    Balancing,
    Persisting,
    Done,
}

/// Observer over pipeline progress.
///
/// All methods default to no-ops; the CLI supplies a console
/// implementation and tests run with [`NoopObserver`].
pub trait PipelineObserver {
    fn stage_started(&self, _stage: Stage) {}
    fn corpus_extracted(&self, _label: CorpusLabel, _count: usize) {}
    fn corpus_written(&self, _label: CorpusLabel, _path: &Path, _count: usize) {}
    fn run_failed(&self, _error: &Error) {}
}

/// Observer that reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum responses required per corpus.
    pub min_count: usize,
    /// Optional per-corpus cap applied before balancing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
    /// Cleaned responses at or below this char count are discarded.
    pub min_response_len: usize,
    /// Raw tabular fields at or below this char count are skipped by
    /// the CSV fallback (see corpusprep-extract for the rationale).
    pub free_text_field_min_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_COUNT,
            max_count: None,
            min_response_len: MIN_RESPONSE_LEN,
            free_text_field_min_len: FREE_TEXT_FIELD_MIN_LEN,
        }
    }
}

/// Input and output locations for one run.
#[derive(Debug, Clone)]
pub struct RunPaths {
    /// Line-oriented source, one candidate answer per line.
    pub yahoo_input: PathBuf,
    /// Quote-delimited or tabular source.
    pub llm_input: PathBuf,
    pub yahoo_output: PathBuf,
    pub llm_output: PathBuf,
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    /// Responses kept for the yahoo corpus before balancing.
    pub yahoo_extracted: usize,
    /// Responses kept for the llm corpus before balancing.
    pub llm_extracted: usize,
    /// Final line count of both output files.
    pub balanced_count: usize,
}

impl PipelineOutcome {
    /// Share of validated responses dropped by balancing, in percent.
    pub fn balance_discard_rate(&self) -> f64 {
        let total = self.yahoo_extracted + self.llm_extracted;
        if total == 0 {
            0.0
        } else {
            let dropped = total - 2 * self.balanced_count;
            (dropped as f64 / total as f64) * 100.0
        }
    }
}

/// Orchestrates the full two-corpus cleaning run.
pub struct PipelineOrchestrator<O = NoopObserver> {
    config: PipelineConfig,
    observer: O,
}

impl PipelineOrchestrator<NoopObserver> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            observer: NoopObserver,
        }
    }
}

impl<O: PipelineObserver> PipelineOrchestrator<O> {
    pub fn with_observer(config: PipelineConfig, observer: O) -> Self {
        Self { config, observer }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run extraction, validation, balancing, and persistence.
    ///
    /// On failure no output file has been replaced, except when the
    /// yahoo output was already renamed into place before an llm write
    /// error; each individual file is still complete or absent.
    pub fn run(&self, paths: &RunPaths) -> Result<PipelineOutcome> {
        match self.run_stages(paths) {
            Ok(outcome) => {
                self.observer.stage_started(Stage::Done);
                Ok(outcome)
            }
            Err(error) => {
                self.observer.run_failed(&error);
                Err(error)
            }
        }
    }

    fn run_stages(&self, paths: &RunPaths) -> Result<PipelineOutcome> {
        self.observer.stage_started(Stage::Extracting);
        let line_extractor =
            LineExtractor::new().with_min_response_len(self.config.min_response_len);
        let quoted_extractor = QuotedSpanExtractor::new()
            .with_min_response_len(self.config.min_response_len)
            .with_free_text_field_min_len(self.config.free_text_field_min_len);

        // The corpora share no mutable state, so extraction may run in
        // parallel. Everything after this point is sequential.
        let (yahoo, llm) = rayon::join(
            || line_extractor.extract_path(&paths.yahoo_input),
            || quoted_extractor.extract_path(&paths.llm_input),
        );
        let yahoo = Corpus::new(CorpusLabel::Yahoo, yahoo?);
        let llm = Corpus::new(CorpusLabel::Llm, llm?);
        self.observer.corpus_extracted(yahoo.label, yahoo.len());
        self.observer.corpus_extracted(llm.label, llm.len());

        for corpus in [&yahoo, &llm] {
            if corpus.is_empty() {
                return Err(Error::EmptyExtraction { label: corpus.label });
            }
        }

        self.observer.stage_started(Stage::Validating);
        let validation = ValidationConfig {
            min_count: self.config.min_count,
            max_count: self.config.max_count,
        };
        let (yahoo_found, llm_found) = (yahoo.len(), llm.len());
        let (yahoo, llm) = match (
            validate(yahoo, &validation),
            validate(llm, &validation),
        ) {
            (Ok(yahoo), Ok(llm)) => (yahoo, llm),
            // Report both counts so the operator knows how much data
            // each source is missing.
            _ => {
                return Err(Error::BelowMinimum {
                    yahoo_actual: yahoo_found,
                    llm_actual: llm_found,
                    required: self.config.min_count,
                })
            }
        };
        let (yahoo_extracted, llm_extracted) = (yahoo.len(), llm.len());

        self.observer.stage_started(Stage::Balancing);
        let (yahoo, llm) = balance(yahoo, llm);
        let balanced_count = yahoo.len();
        info!("balanced both corpora to {} responses", balanced_count);

        self.observer.stage_started(Stage::Persisting);
        write_corpus(&yahoo, &paths.yahoo_output)?;
        self.observer
            .corpus_written(yahoo.label, &paths.yahoo_output, yahoo.len());
        write_corpus(&llm, &paths.llm_output)?;
        self.observer
            .corpus_written(llm.label, &paths.llm_output, llm.len());

        Ok(PipelineOutcome {
            yahoo_extracted,
            llm_extracted,
            balanced_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_yahoo_input(dir: &Path, valid_lines: usize) -> PathBuf {
        let path = dir.join("yahoo_answers.txt");
        let mut content = String::new();
        for i in 0..valid_lines {
            content.push_str(&format!("{}. A solid yahoo answer number {i}\n", i + 1));
            if i % 4 == 0 {
                content.push('\n'); // blank noise lines are dropped
            }
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn write_llm_input(dir: &Path, spans: usize) -> PathBuf {
        let path = dir.join("llm_answers.txt");
        let mut content = String::from("Model run transcript follows.\n");
        for i in 0..spans {
            content.push_str(&format!("\"A generated llm answer number {i}\"\n"));
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn run_paths(dir: &Path, yahoo_input: PathBuf, llm_input: PathBuf) -> RunPaths {
        RunPaths {
            yahoo_input,
            llm_input,
            yahoo_output: dir.join("yahoo_responses.txt"),
            llm_output: dir.join("llm_responses.txt"),
        }
    }

    #[test]
    fn test_end_to_end_balanced_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let yahoo_input = write_yahoo_input(dir.path(), 18);
        let llm_input = write_llm_input(dir.path(), 22);
        let paths = run_paths(dir.path(), yahoo_input, llm_input);

        let orchestrator = PipelineOrchestrator::new(PipelineConfig::default());
        let outcome = orchestrator.run(&paths).unwrap();

        assert_eq!(outcome.yahoo_extracted, 18);
        assert_eq!(outcome.llm_extracted, 22);
        assert_eq!(outcome.balanced_count, 18);

        let yahoo_out = fs::read_to_string(&paths.yahoo_output).unwrap();
        let llm_out = fs::read_to_string(&paths.llm_output).unwrap();
        assert_eq!(yahoo_out.lines().count(), 18);
        assert_eq!(llm_out.lines().count(), 18);
        assert!(yahoo_out.ends_with('\n'));
        assert!(llm_out.ends_with('\n'));

        // Stable order: both outputs are the first N cleaned responses.
        assert_eq!(yahoo_out.lines().next(), Some("A solid yahoo answer number 0"));
        assert_eq!(llm_out.lines().next(), Some("A generated llm answer number 0"));
        assert_eq!(llm_out.lines().last(), Some("A generated llm answer number 17"));
    }

    #[test]
    fn test_below_minimum_reports_both_counts_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let yahoo_input = write_yahoo_input(dir.path(), 12);
        let llm_input = write_llm_input(dir.path(), 22);
        let paths = run_paths(dir.path(), yahoo_input, llm_input);

        let orchestrator = PipelineOrchestrator::new(PipelineConfig::default());
        let error = orchestrator.run(&paths).unwrap_err();

        match error {
            Error::BelowMinimum {
                yahoo_actual,
                llm_actual,
                required,
            } => {
                assert_eq!(yahoo_actual, 12);
                assert_eq!(llm_actual, 22);
                assert_eq!(required, 15);
            }
            other => panic!("expected BelowMinimum, got {other:?}"),
        }
        assert!(!paths.yahoo_output.exists());
        assert!(!paths.llm_output.exists());
    }

    #[test]
    fn test_empty_extraction_fails() {
        let dir = tempfile::tempdir().unwrap();
        let yahoo_input = dir.path().join("yahoo_answers.txt");
        fs::write(&yahoo_input, "1.\n2.\n\n").unwrap();
        let llm_input = write_llm_input(dir.path(), 22);
        let paths = run_paths(dir.path(), yahoo_input, llm_input);

        let orchestrator = PipelineOrchestrator::new(PipelineConfig::default());
        let error = orchestrator.run(&paths).unwrap_err();
        assert!(matches!(
            error,
            Error::EmptyExtraction {
                label: CorpusLabel::Yahoo
            }
        ));
    }

    #[test]
    fn test_max_count_caps_before_balancing() {
        let dir = tempfile::tempdir().unwrap();
        let yahoo_input = write_yahoo_input(dir.path(), 30);
        let llm_input = write_llm_input(dir.path(), 40);
        let paths = run_paths(dir.path(), yahoo_input, llm_input);

        let config = PipelineConfig {
            max_count: Some(20),
            ..PipelineConfig::default()
        };
        let outcome = PipelineOrchestrator::new(config).run(&paths).unwrap();

        assert_eq!(outcome.yahoo_extracted, 20);
        assert_eq!(outcome.llm_extracted, 20);
        assert_eq!(outcome.balanced_count, 20);
    }

    #[test]
    fn test_missing_input_is_extract_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let llm_input = write_llm_input(dir.path(), 22);
        let paths = run_paths(dir.path(), dir.path().join("nope.txt"), llm_input);

        let error = PipelineOrchestrator::new(PipelineConfig::default())
            .run(&paths)
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Extract(corpusprep_extract::Error::Io(_))
        ));
    }

    #[test]
    fn test_balance_discard_rate() {
        let outcome = PipelineOutcome {
            yahoo_extracted: 18,
            llm_extracted: 22,
            balanced_count: 18,
        };
        assert!((outcome.balance_discard_rate() - 10.0).abs() < f64::EPSILON);
    }
}
