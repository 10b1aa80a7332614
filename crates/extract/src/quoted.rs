//! Quote-delimited answer extraction with a tabular fallback
//!
//! LLM exports are not schema-declared: some arrive as a blob of
//! double-quoted spans (possibly multi-line), others as comma-separated
//! rows with quoted fields. The extractor infers intent from shape
//! rather than trusting a fixed grammar: it scans for quoted spans
//! first and only re-reads the input as CSV when that keeps nothing.

use crate::{Result, FREE_TEXT_FIELD_MIN_LEN, MIN_RESPONSE_LEN};
use corpusprep_clean::TextNormalizer;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

static QUOTED_SPAN_REGEX: OnceLock<Regex> = OnceLock::new();

fn quoted_span_regex() -> &'static Regex {
    // [^"] deliberately admits newlines, so a span may run across
    // multiple lines; the negated class keeps the match non-greedy.
    QUOTED_SPAN_REGEX
        .get_or_init(|| Regex::new(r#""([^"]*)""#).expect("Failed to compile span regex"))
}

/// Extracts answers enclosed in double quotes, falling back to a generic
/// tabular-field reader when no spans survive cleaning.
#[derive(Debug, Clone, Copy)]
pub struct QuotedSpanExtractor {
    normalizer: TextNormalizer,
    min_response_len: usize,
    free_text_field_min_len: usize,
}

impl Default for QuotedSpanExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotedSpanExtractor {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            min_response_len: MIN_RESPONSE_LEN,
            free_text_field_min_len: FREE_TEXT_FIELD_MIN_LEN,
        }
    }

    /// Override the minimum kept response length.
    pub fn with_min_response_len(mut self, len: usize) -> Self {
        self.min_response_len = len;
        self
    }

    /// Override the raw-field length above which a tabular field is
    /// treated as a free-text answer.
    pub fn with_free_text_field_min_len(mut self, len: usize) -> Self {
        self.free_text_field_min_len = len;
        self
    }

    /// Extract answers from a blob of text.
    ///
    /// Returns an empty `Vec` when both strategies keep nothing; the
    /// caller decides whether that is a failure.
    pub fn extract(&self, blob: &str) -> Result<Vec<String>> {
        let responses = self.extract_spans(blob);
        if !responses.is_empty() {
            return Ok(responses);
        }
        debug!("no quoted spans kept, trying tabular fallback");
        self.extract_tabular(blob)
    }

    /// Read a UTF-8 text file and extract its answers.
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let blob = fs::read_to_string(path)?;
        let responses = self.extract(&blob)?;
        debug!("quoted extraction kept {} responses from {:?}", responses.len(), path);
        Ok(responses)
    }

    /// Primary strategy: every double-quoted span in the blob.
    fn extract_spans(&self, blob: &str) -> Vec<String> {
        quoted_span_regex()
            .captures_iter(blob)
            .filter_map(|caps| self.normalizer.normalize(&caps[1]))
            .filter(|cleaned| cleaned.chars().count() > self.min_response_len)
            .collect()
    }

    /// Fallback strategy: parse as headerless CSV and keep every field
    /// long enough to look like a free-text answer.
    fn extract_tabular(&self, blob: &str) -> Result<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(blob.as_bytes());

        let mut responses = Vec::new();
        for record in reader.records() {
            let record = record?;
            for field in record.iter() {
                // Only leading whitespace after a separator is ignored;
                // trailing padding still counts toward the length check.
                let field = field.trim_start();
                if field.chars().count() <= self.free_text_field_min_len {
                    continue;
                }
                if let Some(cleaned) = self.normalizer.normalize(field) {
                    if cleaned.chars().count() > self.min_response_len {
                        responses.push(cleaned);
                    }
                }
            }
        }
        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_quoted_spans_extracted() {
        let blob = r#"Model output follows. "The first answer text" and then "A second answer text" end."#;
        let extracted = QuotedSpanExtractor::new().extract(blob).unwrap();
        assert_eq!(
            extracted,
            vec![
                "The first answer text".to_string(),
                "A second answer text".to_string(),
            ]
        );
    }

    #[test]
    fn test_span_may_cross_lines() {
        let blob = "\"An answer that\nwraps across two lines\"\n\"And a one-liner answer\"";
        let extracted = QuotedSpanExtractor::new().extract(blob).unwrap();
        assert_eq!(
            extracted,
            vec![
                "An answer that wraps across two lines".to_string(),
                "And a one-liner answer".to_string(),
            ]
        );
    }

    #[test]
    fn test_short_spans_dropped() {
        let blob = r#""ok" "no" "A kept answer over the bar""#;
        let extracted = QuotedSpanExtractor::new().extract(blob).unwrap();
        assert_eq!(extracted, vec!["A kept answer over the bar".to_string()]);
    }

    #[test]
    fn test_tabular_fallback_engaged_when_no_spans() {
        // No double quote anywhere, so the primary strategy keeps zero.
        // 16 rows, each with exactly one field above the length heuristic.
        let mut blob = String::new();
        for i in 0..16 {
            blob.push_str(&format!(
                "{i},this free text answer is long enough number {i},tag\n"
            ));
        }

        let extracted = QuotedSpanExtractor::new().extract(&blob).unwrap();
        assert_eq!(extracted.len(), 16);
        for (i, response) in extracted.iter().enumerate() {
            assert_eq!(
                response,
                &format!("this free text answer is long enough number {i}")
            );
        }
    }

    #[test]
    fn test_fallback_skipped_when_spans_found() {
        // The quoted span keeps one response, so the CSV fallback (which
        // would keep the long unquoted field too) must not run.
        let blob = "id,\"A quoted answer that counts\",this unquoted field is also long enough\n";
        let extracted = QuotedSpanExtractor::new().extract(blob).unwrap();
        assert_eq!(extracted, vec!["A quoted answer that counts".to_string()]);
    }

    #[test]
    fn test_short_fields_skipped_by_fallback() {
        let blob = "1,short field,99\n2,another short one,42\n";
        let extracted = QuotedSpanExtractor::new().extract(blob).unwrap();
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_trailing_padding_counts_toward_field_length() {
        // 18 chars of text padded past the threshold by trailing spaces:
        // the raw field qualifies, and normalization drops the padding.
        let blob = "1,padded answer text          ,9\n";
        let extracted = QuotedSpanExtractor::new().extract(blob).unwrap();
        assert_eq!(extracted, vec!["padded answer text".to_string()]);
    }

    #[test]
    fn test_leading_whitespace_after_separator_ignored() {
        // Leading spaces after the separator do not pad a short field
        // over the threshold.
        let blob = "2,                      tiny,3\n";
        let extracted = QuotedSpanExtractor::new().extract(blob).unwrap();
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_field_length_threshold_overridable() {
        let blob = "1,ten chars!,99\n";
        let extractor = QuotedSpanExtractor::new().with_free_text_field_min_len(9);
        let extracted = extractor.extract(blob).unwrap();
        assert_eq!(extracted, vec!["ten chars!".to_string()]);
    }

    #[test]
    fn test_extract_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\"File-borne answer number one\" \"File-borne answer number two\"").unwrap();
        file.flush().unwrap();

        let extracted = QuotedSpanExtractor::new().extract_path(file.path()).unwrap();
        assert_eq!(extracted.len(), 2);
    }
}
