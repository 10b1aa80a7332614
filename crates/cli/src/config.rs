//! Configuration file support for cleaning runs

use anyhow::{Context, Result};
use corpusprep_core::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    pub inputs: InputsConfig,
    pub outputs: OutputsConfig,
    pub pipeline: PipelineConfig,
    pub backup: BackupConfig,
}

impl RunConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }

    /// Save configuration to a file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let content = match extension {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                    extension
                ))
            }
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Prioritized candidate names for each input, tried in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    pub yahoo_candidates: Vec<String>,
    pub llm_candidates: Vec<String>,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            yahoo_candidates: [
                "data/yahoo_answers.csv",
                "data/yahoo_responses.csv",
                "data/yahoo.csv",
                "data/yahoo_answers.txt",
                "data/yahoo_responses.txt",
            ]
            .map(String::from)
            .to_vec(),
            llm_candidates: [
                "data/llm_answers.csv",
                "data/llm_responses.csv",
                "data/llm.csv",
                "data/llm_answers.txt",
                "data/llm_responses.txt",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputsConfig {
    pub yahoo: PathBuf,
    pub llm: PathBuf,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            yahoo: PathBuf::from("data/yahoo_responses.txt"),
            llm: PathBuf::from("data/llm_responses.txt"),
        }
    }
}

/// Backup bookkeeping for consumed inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    pub enabled: bool,
    pub dir: PathBuf,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("data/original"),
        }
    }
}
