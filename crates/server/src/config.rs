//! # Application Configuration
//!
//! This module defines the configuration structure for the
//! `knowledgebot-server` and provides the logic for loading it from a
//! `config.yml` file and environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite database file. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// The path to the knowledge base CSV, relative to the working
    /// directory.
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    /// The CSV column holding the titles that form the context block.
    #[serde(default = "default_csv_title_column")]
    pub csv_title_column: String,
    /// The directory holding per-type prompt template YAML files.
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: String,
    /// The AI provider configuration.
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            db_url: default_db_url(),
            csv_path: default_csv_path(),
            csv_title_column: default_csv_title_column(),
            prompts_dir: default_prompts_dir(),
            provider: ProviderConfig::default(),
        }
    }
}

/// Configuration for the OpenAI provider.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_api_url")]
    pub api_url: String,
    /// The API key. The provider integration is enabled only when this is
    /// present and non-empty.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: default_provider_api_url(),
            api_key: None,
            model_name: default_model_name(),
        }
    }
}

impl ProviderConfig {
    /// Whether the provider integration is enabled process-wide.
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

fn default_port() -> u16 {
    8090
}
fn default_db_url() -> String {
    "knowledgebot_logs.db".to_string()
}
fn default_csv_path() -> String {
    "data/imdb_movies.csv".to_string()
}
fn default_csv_title_column() -> String {
    "title".to_string()
}
fn default_prompts_dir() -> String {
    "prompts".to_string()
}
fn default_provider_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}
fn default_model_name() -> String {
    "gpt-3.5-turbo".to_string()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| "".to_string())
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment
/// variables.
///
/// Environment variables are merged on top of the file:
/// - Top-level keys like `port` and `db_url` are overridden by `PORT` and
///   `DB_URL`.
/// - Nested keys are overridden by `KNOWLEDGEBOT_...` variables (e.g.
///   `KNOWLEDGEBOT_PROVIDER__MODEL_NAME`).
/// - `${VAR}` references inside the YAML are substituted before parsing.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let main_config_path = config_path_override
        .map(str::to_string)
        .unwrap_or_else(|| format!("{base_path}/config.yml"));

    let mut builder = ConfigBuilder::builder();
    match read_and_substitute(&main_config_path)? {
        Some(content) => {
            info!("Loading configuration from '{main_config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if config_path_override.is_some() => {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{main_config_path}'."
            )));
        }
        // No config.yml present: serde defaults plus the environment.
        None => {}
    }

    let settings = builder
        // Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("KNOWLEDGEBOT")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // The key usually arrives via ${OPENAI_API_KEY} substitution in the
    // YAML; check the environment directly so a missing config file does
    // not silently disable the provider.
    if !config.provider.is_enabled() {
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                config.provider.api_key = Some(key);
            }
        }
    }

    Ok(config)
}
