//! Corpus model shared across pipeline stages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an answer source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusLabel {
    /// Q&A-site answers, one per line.
    Yahoo,
    /// Language-model answers, quote-delimited or tabular.
    Llm,
}

impl CorpusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorpusLabel::Yahoo => "yahoo",
            CorpusLabel::Llm => "llm",
        }
    }
}

impl fmt::Display for CorpusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered sequence of cleaned responses from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub label: CorpusLabel,
    pub responses: Vec<String>,
}

impl Corpus {
    pub fn new(label: CorpusLabel, responses: Vec<String>) -> Self {
        Self { label, responses }
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Keep the first `n` responses and drop the rest.
    pub fn truncate(&mut self, n: usize) {
        self.responses.truncate(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strings() {
        assert_eq!(CorpusLabel::Yahoo.as_str(), "yahoo");
        assert_eq!(CorpusLabel::Llm.to_string(), "llm");
    }

    #[test]
    fn test_truncate_keeps_front() {
        let mut corpus = Corpus::new(
            CorpusLabel::Yahoo,
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        corpus.truncate(2);
        assert_eq!(corpus.responses, vec!["a".to_string(), "b".to_string()]);
    }
}
