use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::core::processor::DEFAULT_IDENTITY_COLUMNS;
use crate::core::translate::DEFAULT_ENDPOINT;

pub const CONFIG_FILE_NAME: &str = ".feelbackrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_identity_columns")]
    pub identity_columns: Vec<String>,
    #[serde(default = "default_input")]
    pub default_input: String,
    #[serde(default)]
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConfig {
    #[serde(default = "default_translation_enabled")]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_identity_columns() -> Vec<String> {
    DEFAULT_IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect()
}

fn default_input() -> String {
    "feedback.csv".to_string()
}

fn default_translation_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity_columns: default_identity_columns(),
            default_input: default_input(),
            translation: TranslationConfig::default(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: default_translation_enabled(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.default_input.trim().is_empty(),
            "Invalid value for 'defaultInput': must not be empty"
        );
        ensure!(
            self.translation.timeout_secs > 0,
            "Invalid value for 'translation.timeoutSecs': must be greater than 0"
        );
        if self.translation.enabled {
            ensure!(
                !self.translation.endpoint.trim().is_empty(),
                "Invalid value for 'translation.endpoint': must not be empty"
            );
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, or `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
