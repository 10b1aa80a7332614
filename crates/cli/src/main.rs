//! corpusprep CLI
//!
//! Cleans two raw answer corpora (a line-oriented Q&A-site export and a
//! quote-delimited LLM export) into two balanced output files.

mod config;
mod inputs;
mod progress;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use corpusprep_core::{
    Corpus, CorpusLabel, PipelineConfig, PipelineObserver, PipelineOrchestrator, PipelineOutcome,
    RunPaths, ValidationConfig,
};
use corpusprep_extract::{LineExtractor, QuotedSpanExtractor};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use config::RunConfig;
use progress::{ConsoleObserver, QuietObserver};

#[derive(Parser)]
#[command(name = "corpusprep")]
#[command(version, about = "Clean and balance two answer corpora for batch analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output reports in JSON format
    #[arg(long, global = true)]
    json: bool,
}

/// Which extraction strategy an input uses.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Source {
    /// Line-oriented: one candidate answer per line
    Yahoo,
    /// Quote-delimited spans, with a tabular fallback
    Llm,
}

impl Source {
    fn label(self) -> CorpusLabel {
        match self {
            Source::Yahoo => CorpusLabel::Yahoo,
            Source::Llm => CorpusLabel::Llm,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full two-corpus pipeline: extract, validate, balance, write
    Run {
        /// Line-oriented input (default: first existing candidate under data/)
        #[arg(long)]
        yahoo_input: Option<PathBuf>,

        /// Quote-delimited input (default: first existing candidate under data/)
        #[arg(long)]
        llm_input: Option<PathBuf>,

        /// Output file for the yahoo corpus
        #[arg(long)]
        yahoo_output: Option<PathBuf>,

        /// Output file for the llm corpus
        #[arg(long)]
        llm_output: Option<PathBuf>,

        /// Run config file (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum responses required per corpus
        #[arg(long)]
        min_count: Option<usize>,

        /// Cap each corpus at this many responses before balancing
        #[arg(long)]
        max_count: Option<usize>,

        /// Leave input files in place after a successful run
        #[arg(long)]
        no_backup: bool,
    },

    /// Clean and validate a single source without balancing
    Clean {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Extraction strategy for the input
        #[arg(short, long, value_enum)]
        source: Source,

        /// Minimum responses required
        #[arg(long, default_value = "15")]
        min_count: usize,

        /// Cap the corpus at this many responses
        #[arg(long)]
        max_count: Option<usize>,
    },

    /// Show the first cleaned responses from an input
    Inspect {
        /// Path to the input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Extraction strategy for the input
        #[arg(short, long, value_enum)]
        source: Source,

        /// Number of responses to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Count cleaned responses in an input without writing anything
    Count {
        /// Path to the input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Extraction strategy for the input
        #[arg(short, long, value_enum)]
        source: Source,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            yahoo_input,
            llm_input,
            yahoo_output,
            llm_output,
            config,
            min_count,
            max_count,
            no_backup,
        } => run(
            yahoo_input,
            llm_input,
            yahoo_output,
            llm_output,
            config,
            min_count,
            max_count,
            no_backup,
            cli.json,
        ),
        Commands::Clean {
            input,
            output,
            source,
            min_count,
            max_count,
        } => clean(input, output, source, min_count, max_count, cli.json),
        Commands::Inspect {
            input,
            source,
            limit,
        } => inspect(input, source, limit),
        Commands::Count { input, source } => count(input, source, cli.json),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run(
    yahoo_input: Option<PathBuf>,
    llm_input: Option<PathBuf>,
    yahoo_output: Option<PathBuf>,
    llm_output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    min_count: Option<usize>,
    max_count: Option<usize>,
    no_backup: bool,
    json_output: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunConfig::load(&path)?,
        None => RunConfig::default(),
    };
    if let Some(min) = min_count {
        config.pipeline.min_count = min;
    }
    if let Some(max) = max_count {
        config.pipeline.max_count = Some(max);
    }
    if no_backup {
        config.backup.enabled = false;
    }

    let yahoo_input = resolve_input(yahoo_input, &config.inputs.yahoo_candidates, "yahoo")?;
    let llm_input = resolve_input(llm_input, &config.inputs.llm_candidates, "llm")?;

    let paths = RunPaths {
        yahoo_input,
        llm_input,
        yahoo_output: yahoo_output.unwrap_or(config.outputs.yahoo),
        llm_output: llm_output.unwrap_or(config.outputs.llm),
    };

    info!("Starting corpus cleaning run");
    info!("  Yahoo input: {:?}", paths.yahoo_input);
    info!("  LLM input:   {:?}", paths.llm_input);

    let (outcome, backed_up) = if json_output {
        run_and_backup(config.pipeline, &paths, &config.backup, QuietObserver)?
    } else {
        let observer = ConsoleObserver::new();
        let result = run_and_backup(config.pipeline, &paths, &config.backup, observer.clone());
        observer.finish();
        result?
    };

    if json_output {
        let report = serde_json::json!({
            "status": "balanced",
            "yahoo_input": paths.yahoo_input.to_string_lossy(),
            "llm_input": paths.llm_input.to_string_lossy(),
            "yahoo_output": paths.yahoo_output.to_string_lossy(),
            "llm_output": paths.llm_output.to_string_lossy(),
            "yahoo_extracted": outcome.yahoo_extracted,
            "llm_extracted": outcome.llm_extracted,
            "balanced_count": outcome.balanced_count,
            "backed_up": backed_up,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_run_summary(&paths, &outcome);
        progress::print_sample(CorpusLabel::Yahoo, &paths.yahoo_output, 3);
        progress::print_sample(CorpusLabel::Llm, &paths.llm_output, 3);
    }

    Ok(())
}

/// Run the pipeline, then move the consumed inputs into the backup
/// directory. The orchestrator only returns `Ok` once both outputs are
/// in place, so a failed run leaves both inputs untouched. A backup
/// rename failure is logged, never fatal.
fn run_and_backup<O: PipelineObserver>(
    pipeline: PipelineConfig,
    paths: &RunPaths,
    backup: &config::BackupConfig,
    observer: O,
) -> Result<(PipelineOutcome, Vec<PathBuf>)> {
    let outcome = PipelineOrchestrator::with_observer(pipeline, observer).run(paths)?;

    let mut backed_up = Vec::new();
    if backup.enabled {
        for input in [&paths.yahoo_input, &paths.llm_input] {
            match inputs::backup_input(input, &backup.dir) {
                Ok(dest) => {
                    info!("Backed up {:?} to {:?}", input, dest);
                    backed_up.push(dest);
                }
                Err(e) => warn!("Skipping backup of {:?}: {e:#}", input),
            }
        }
    }

    Ok((outcome, backed_up))
}

fn clean(
    input: PathBuf,
    output: PathBuf,
    source: Source,
    min_count: usize,
    max_count: Option<usize>,
    json_output: bool,
) -> Result<()> {
    info!("Cleaning single source");
    info!("  Input: {:?}", input);
    info!("  Output: {:?}", output);

    let responses = extract_source(source, &input)?;
    let corpus = Corpus::new(source.label(), responses);
    let validation = ValidationConfig {
        min_count,
        max_count,
    };
    let corpus = corpusprep_core::validate::validate(corpus, &validation)?;
    corpusprep_core::persist::write_corpus(&corpus, &output)?;

    if json_output {
        let report = serde_json::json!({
            "input": input.to_string_lossy(),
            "output": output.to_string_lossy(),
            "source": corpus.label.as_str(),
            "responses": corpus.len(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Wrote {} {} responses to {}",
            corpus.len(),
            corpus.label,
            output.display()
        );
    }

    Ok(())
}

fn inspect(input: PathBuf, source: Source, limit: usize) -> Result<()> {
    let responses = extract_source(source, &input)?;
    for (i, response) in responses.iter().take(limit).enumerate() {
        println!("{}. {}", i + 1, progress::preview(response, 100));
    }
    info!("{} cleaned responses total", responses.len());
    Ok(())
}

fn count(input: PathBuf, source: Source, json_output: bool) -> Result<()> {
    let responses = extract_source(source, &input)?;
    if json_output {
        let report = serde_json::json!({
            "input": input.to_string_lossy(),
            "responses": responses.len(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Total responses: {}", responses.len());
    }
    Ok(())
}

/// Explicit path if given, otherwise the first existing candidate.
fn resolve_input(
    explicit: Option<PathBuf>,
    candidates: &[String],
    name: &str,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    inputs::first_existing(candidates.iter().map(String::as_str)).with_context(|| {
        format!(
            "No {name} input found. Tried, in order: {}",
            candidates.join(", ")
        )
    })
}

fn extract_source(source: Source, input: &Path) -> Result<Vec<String>> {
    let responses = match source {
        Source::Yahoo => LineExtractor::new().extract_path(input)?,
        Source::Llm => QuotedSpanExtractor::new().extract_path(input)?,
    };
    Ok(responses)
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
