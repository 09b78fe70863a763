//! Configuration loading and the typed settings it produces

mod settings;

pub use settings::{Config, FileConfig, LoggingConfig};

use crate::error::{Error, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Resolve settings for a run: documented defaults, then a discovered
    /// `runlog.toml` (or `.runlog.toml`), then `RUNLOG_*` environment
    /// variables with `__` separating nesting levels.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = Self::find_config_file(&cwd) {
            debug!("loading config from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        Self::extract(figment)
    }

    /// Same layering as [`Config::load`] with an explicit file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let figment =
            Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path));

        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Config = figment
            .merge(Env::prefixed("RUNLOG_").split("__"))
            .extract()
            .map_err(|e| Error::Config(format!("failed to load config: {e}")))?;

        config.validate()?;
        Ok(config)
    }
}
