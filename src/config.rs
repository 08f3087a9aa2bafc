//! Optional TOML configuration for the posts generator.
//!
//! No file is needed: `Config::default()` fetches the RAPIDS feed and writes
//! `data/posts/medium.yaml` next to the crate directory. A config file or the
//! command-line flags only override those values.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Feed the site pulls its Medium posts from.
pub const DEFAULT_FEED_URL: &str = "https://medium.com/feed/rapids-ai";

/// Name written into the generated-file header.
pub const DEFAULT_GENERATOR: &str = "get_medium";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Settings for one generator run.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// RSS feed to download.
    pub feed_url: String,

    /// Destination of the generated YAML file.
    pub output: PathBuf,

    /// Program name recorded in the file header.
    pub generator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            output: default_output_path(),
            generator: DEFAULT_GENERATOR.to_string(),
        }
    }
}

/// `data/posts/medium.yaml` at the site root, one level above this crate
/// (the crate lives in the site's `scripts/` directory).
pub fn default_output_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("data")
        .join("posts")
        .join("medium.yaml")
}

impl Config {
    /// SEC-014: Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 3] = ["feed_url", "output", "generator"];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted and logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            feed_url = %config.feed_url,
            output = %config.output.display(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, feed_url: Option<String>, output: Option<PathBuf>) -> Self {
        if let Some(url) = feed_url {
            self.feed_url = url;
        }
        if let Some(path) = output {
            self.output = path;
        }
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
