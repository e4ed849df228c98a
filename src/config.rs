//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.jobpulse.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".jobpulse.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Job search API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Model settings for enrichment and autocomplete.
    #[serde(default)]
    pub model: ModelConfig,

    /// Listing and export settings.
    #[serde(default)]
    pub listing: ListingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Where the last search results are stored.
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,

    /// Default analytics report path.
    #[serde(default = "default_report")]
    pub report: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
            report: default_report(),
        }
    }
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("last_search.json")
}

fn default_report() -> PathBuf {
    PathBuf::from("jobpulse_report.md")
}

/// Job search API (JSearch on RapidAPI) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API host, with or without scheme.
    #[serde(default = "default_api_host")]
    pub host: String,

    /// RapidAPI key. Prefer the RAPIDAPI_KEY environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Result pages requested per search.
    #[serde(default = "default_num_pages")]
    pub num_pages: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            key: None,
            num_pages: default_num_pages(),
            timeout_seconds: default_api_timeout(),
        }
    }
}

fn default_api_host() -> String {
    "jsearch.p.rapidapi.com".to_string()
}

fn default_num_pages() -> u32 {
    10
}

fn default_api_timeout() -> u64 {
    30
}

/// LLM model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name.
    #[serde(default = "default_model")]
    pub name: String,

    /// Ollama API URL.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_model_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            ollama_url: default_ollama_url(),
            temperature: default_temperature(),
            timeout_seconds: default_model_timeout(),
        }
    }
}

fn default_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_model_timeout() -> u64 {
    120
}

/// Listing and export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Postings shown per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Default CSV export path.
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            export_file: default_export_file(),
        }
    }
}

fn default_per_page() -> usize {
    crate::listing::paginator::DEFAULT_PER_PAGE
}

fn default_export_file() -> PathBuf {
    PathBuf::from("job_listings.csv")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values given on the command line (or through their environment
    /// variables) override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref snapshot) = args.snapshot {
            self.general.snapshot = snapshot.clone();
        }

        if let Some(ref key) = args.api_key {
            self.api.key = Some(key.clone());
        }
        if let Some(ref host) = args.api_host {
            self.api.host = host.clone();
        }

        if let Some(ref model) = args.model {
            self.model.name = model.clone();
        }
        if let Some(ref url) = args.ollama_url {
            self.model.ollama_url = url.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.host, "jsearch.p.rapidapi.com");
        assert_eq!(config.api.num_pages, 10);
        assert_eq!(config.listing.per_page, 5);
        assert_eq!(config.general.snapshot, PathBuf::from("last_search.json"));
        assert!(config.api.key.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
snapshot = "/tmp/jobs.json"

[api]
num_pages = 3

[model]
name = "qwen2.5:7b"
temperature = 0.5

[listing]
per_page = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.snapshot, PathBuf::from("/tmp/jobs.json"));
        assert_eq!(config.api.num_pages, 3);
        assert_eq!(config.api.host, "jsearch.p.rapidapi.com");
        assert_eq!(config.model.name, "qwen2.5:7b");
        assert_eq!(config.model.temperature, 0.5);
        assert_eq!(config.listing.per_page, 10);
        assert_eq!(config.listing.export_file, PathBuf::from("job_listings.csv"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[listing]\nper_page = 7\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.listing.per_page, 7);

        std::fs::write(&path, "[listing\nbroken").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_merge_with_args() {
        let args = crate::cli::Args::try_parse_from([
            "jobpulse",
            "--snapshot",
            "other.json",
            "--api-key",
            "secret",
            "--model",
            "mistral",
            "list",
        ])
        .unwrap();

        let mut config = Config::default();
        config.merge_with_args(&args);

        assert_eq!(config.general.snapshot, PathBuf::from("other.json"));
        assert_eq!(config.api.key.as_deref(), Some("secret"));
        assert_eq!(config.model.name, "mistral");
        assert_eq!(config.listing.per_page, 5);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[model]"));
        assert!(toml_str.contains("[listing]"));
        assert!(!toml_str.contains("key ="));
    }
}
