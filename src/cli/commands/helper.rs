use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::args::CommonArgs;
use crate::config::{Config, ConfigLoadResult, load_config};
use crate::core::classifier::Classifier;
use crate::core::translate::{DisabledTranslator, GoogleTranslator, Translator};

/// Settings shared by the classifying commands.
pub struct RunContext {
    pub cwd: PathBuf,
    pub config: Config,
    /// Whether text is sent for translation (config and `--no-translate`).
    pub translation_enabled: bool,
}

impl RunContext {
    pub fn load(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to get current directory")?;
        let ConfigLoadResult { config, path } = load_config(&cwd)?;

        if common.verbose
            && let Some(path) = &path
        {
            eprintln!("{} using config {}", "info:".bold().cyan(), path.display());
        }

        let translation_enabled = config.translation.enabled && !common.no_translate;
        Ok(Self {
            cwd,
            config,
            translation_enabled,
        })
    }

    pub fn classifier(&self) -> Result<Classifier> {
        let translator: Box<dyn Translator> = if self.translation_enabled {
            let translation = &self.config.translation;
            Box::new(
                GoogleTranslator::new(translation.endpoint.as_str(), translation.timeout())
                    .context("Failed to create translation client")?,
            )
        } else {
            Box::new(DisabledTranslator)
        };
        Ok(Classifier::new(translator))
    }
}
