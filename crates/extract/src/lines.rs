//! Line-oriented answer extraction
//!
//! For sources that carry one candidate answer per line (the Q&A-site
//! export format).

use crate::{Result, MIN_RESPONSE_LEN};
use corpusprep_clean::TextNormalizer;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Extracts one candidate answer per input line.
#[derive(Debug, Clone, Copy)]
pub struct LineExtractor {
    normalizer: TextNormalizer,
    min_response_len: usize,
}

impl Default for LineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineExtractor {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            min_response_len: MIN_RESPONSE_LEN,
        }
    }

    /// Override the minimum kept response length.
    pub fn with_min_response_len(mut self, len: usize) -> Self {
        self.min_response_len = len;
        self
    }

    /// Normalize each line, keeping non-trivial results in input order.
    pub fn extract<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.normalizer.normalize(line.as_ref()))
            .filter(|cleaned| cleaned.chars().count() > self.min_response_len)
            .collect()
    }

    /// Read a UTF-8 text file and extract one answer per line.
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let lines: Vec<String> = BufReader::new(file).lines().collect::<std::io::Result<_>>()?;
        let responses = self.extract(&lines);
        debug!(
            "line extraction kept {} of {} lines from {:?}",
            responses.len(),
            lines.len(),
            path
        );
        Ok(responses)
    }
}
