//! Fixed-step cleaning for raw answer candidates
//!
//! Unlike a general NLP normalizer, this applies a small fixed set of
//! textual cleanups in a fixed order. Later steps assume earlier ones
//! already ran.

use regex::Regex;
use std::sync::OnceLock;

// Lazy-initialized regexes, compiled once per process
static ENUMERATION_REGEX: OnceLock<Regex> = OnceLock::new();
static EMPHASIS_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn enumeration_regex() -> &'static Regex {
    ENUMERATION_REGEX.get_or_init(|| {
        Regex::new(r"^\s*\d+\.?\s*").expect("Failed to compile enumeration regex")
    })
}

fn emphasis_regex() -> &'static Regex {
    EMPHASIS_REGEX.get_or_init(|| {
        Regex::new(r"\*\*([^*]+)\*\*").expect("Failed to compile emphasis regex")
    })
}

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX
        .get_or_init(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"))
}

/// Cleans one raw answer candidate into a single line of text.
///
/// Applies, in order:
/// 1. Strip a leading enumeration marker (`"1."`, `"12 "`) at the very
///    start of the string only.
/// 2. Unwrap markdown emphasis (`**text**` → `text`, non-greedy).
/// 3. Remove any remaining asterisks.
/// 4. Strip one wrapping layer of double quotes, then single quotes,
///    from each end.
/// 5. Collapse every whitespace run (including newlines) into a single
///    space and trim.
///
/// Inputs that reduce to nothing (blank lines, bare enumeration markers)
/// yield `None` and are discarded by callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Clean `raw`, returning `None` when nothing usable remains.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        if raw.trim().is_empty() {
            return None;
        }

        // Leading enumeration marker is removed once, at the start only.
        let text = enumeration_regex().replace(raw, "");

        // Unwrap **emphasis**, then drop stray asterisks.
        let text = emphasis_regex().replace_all(&text, "${1}");
        let text = text.replace('*', "");

        // One wrapping quote layer per end, double before single. Outer
        // whitespace does not count as part of the wrap.
        let text = text.trim();
        let text = strip_wrapping(text, '"');
        let text = strip_wrapping(text, '\'');

        let text = whitespace_regex().replace_all(text.trim(), " ");
        let text = text.trim();

        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Remove at most one `quote` from each end of `s`, each end independently.
fn strip_wrapping(s: &str, quote: char) -> &str {
    let s = s.strip_prefix(quote).unwrap_or(s);
    s.strip_suffix(quote).unwrap_or(s)
}
