//! Progress reporting and run summaries for the CLI

use corpusprep_core::{CorpusLabel, Error, PipelineObserver, PipelineOutcome, RunPaths, Stage};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Spinner-based observer for interactive runs.
#[derive(Clone)]
pub struct ConsoleObserver {
    bar: ProgressBar,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for ConsoleObserver {
    fn stage_started(&self, stage: Stage) {
        let msg = match stage {
            Stage::Extracting => "Extracting responses...",
            Stage::Validating => "Validating corpus sizes...",
            Stage::Balancing => "Balancing corpora...",
            Stage::Persisting => "Writing output files...",
            Stage::Done => "Done",
        };
        self.bar.set_message(msg);
    }

    fn corpus_extracted(&self, label: CorpusLabel, count: usize) {
        self.bar.println(format!("  {label}: {count} responses extracted"));
    }

    fn corpus_written(&self, label: CorpusLabel, path: &Path, count: usize) {
        self.bar
            .println(format!("  {label}: {count} responses written to {}", path.display()));
    }

    fn run_failed(&self, error: &Error) {
        self.bar.println(format!("  run failed: {error}"));
        self.bar.finish_and_clear();
    }
}

/// Observer that stays quiet, for `--json` runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuietObserver;

impl PipelineObserver for QuietObserver {}

/// Print a formatted summary of a balanced run.
pub fn print_run_summary(paths: &RunPaths, outcome: &PipelineOutcome) {
    println!("\n{}", "═".repeat(60));
    println!("Corpus Cleaning Complete");
    println!("{}", "═".repeat(60));
    println!("Yahoo input:   {}", paths.yahoo_input.display());
    println!("LLM input:     {}", paths.llm_input.display());
    println!(
        "Yahoo:         {} responses extracted",
        outcome.yahoo_extracted
    );
    println!(
        "LLM:           {} responses extracted",
        outcome.llm_extracted
    );
    println!(
        "Balanced:      {} responses per corpus ({:.1}% dropped)",
        outcome.balanced_count,
        outcome.balance_discard_rate()
    );
    println!("Yahoo output:  {}", paths.yahoo_output.display());
    println!("LLM output:    {}", paths.llm_output.display());
    println!("{}", "═".repeat(60));
}

/// Print the first few responses of a written corpus as a sanity check.
pub fn print_sample(label: CorpusLabel, output: &Path, limit: usize) {
    let Ok(content) = std::fs::read_to_string(output) else {
        return;
    };
    println!("Sample ({label}):");
    for (i, response) in content.lines().take(limit).enumerate() {
        println!("  {}. {}", i + 1, preview(response, 80));
    }
}

/// Truncate `s` to at most `max_chars`, appending an ellipsis when cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_string_untouched() {
        assert_eq!(preview("short answer", 80), "short answer");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(100);
        let cut = preview(&long, 80);
        assert_eq!(cut.chars().count(), 83); // 80 chars + "..."
        assert!(cut.ends_with("..."));
    }
}
