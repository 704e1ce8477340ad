// Configuration loading and parsing (config/pipeline.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// pipeline.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire pipeline.toml file.
#[derive(Debug, Clone, Deserialize)]
struct PipelineFile {
    data_paths: DataPaths,
    output: OutputSection,
    roster: RosterSection,
}

/// Paths to the two source feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub holes: String,
    pub shots: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OutputSection {
    dir: String,
}

/// The two team rosters as explicit player-ID lists. Kept as strings because
/// scorer player IDs are opaque identifiers, not numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterSection {
    pub us: Vec<String>,
    pub international: Vec<String>,
}

/// The assembled configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_paths: DataPaths,
    pub output_dir: String,
    pub roster: RosterSection,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate a pipeline.toml document. `path` is only used for
/// error reporting.
fn parse_pipeline_toml(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: PipelineFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_roster(&file.roster)?;

    Ok(Config {
        data_paths: file.data_paths,
        output_dir: file.output.dir,
        roster: file.roster,
    })
}

fn validate_roster(roster: &RosterSection) -> Result<(), ConfigError> {
    if roster.us.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "roster.us".into(),
            message: "roster must list at least one player id".into(),
        });
    }
    if roster.international.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "roster.international".into(),
            message: "roster must list at least one player id".into(),
        });
    }
    for id in &roster.us {
        if roster.international.contains(id) {
            return Err(ConfigError::ValidationError {
                field: "roster".into(),
                message: format!("player id {id} appears on both rosters"),
            });
        }
    }
    Ok(())
}

/// Load and validate configuration from `config/pipeline.toml` relative to
/// the given base directory.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("pipeline.toml");
    let text = std::fs::read_to_string(&path)
        .map_err(|_| ConfigError::FileNotFound { path: path.clone() })?;
    parse_pipeline_toml(&text, &path)
}

/// Load configuration relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("."))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
