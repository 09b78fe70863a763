use crate::error::{Error, Result};
use chrono::format::StrftimeItems;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings snapshot for one run, resolved once and never mutated after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub logging: LoggingConfig,
}

/// Placement and gating of the per-run outcome records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether outcome records are written at all. Off by default.
    pub enable: bool,
    /// Root of the log tree, resolved against the working directory.
    pub base_directory: PathBuf,
    /// Subdirectory under the base for command records.
    pub directory: String,
    pub file: FileConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable: false,
            base_directory: PathBuf::from("storage/logs"),
            directory: "command".to_string(),
            file: FileConfig::default(),
        }
    }
}

/// Log file naming, permissions and ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// strftime pattern for the file stem; one file per day by default.
    pub name_format: String,
    pub extension: String,
    /// Unix permission bits applied to the file after each write.
    pub mode: u32,
    pub owner: Option<String>,
    pub group: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            name_format: "%Y-%m-%d".to_string(),
            extension: "log".to_string(),
            mode: 0o666,
            owner: None,
            group: None,
        }
    }
}

impl Config {
    /// Walk upward from `start_path` looking for a config file.
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(".runlog.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            let config_path = current.join("runlog.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// Reject values that cannot produce a writable, well-named log file.
    pub fn validate(&self) -> Result<()> {
        let file = &self.logging.file;

        if file.mode > 0o7777 {
            return Err(Error::Config(format!(
                "file mode {:o} does not fit in permission bits",
                file.mode
            )));
        }
        if file.extension.is_empty() {
            return Err(Error::Config("file extension must not be empty".to_string()));
        }
        if file.name_format.is_empty() {
            return Err(Error::Config("file name_format must not be empty".to_string()));
        }
        if StrftimeItems::new(&file.name_format).parse().is_err() {
            return Err(Error::Config(format!(
                "file name_format `{}` is not a valid strftime pattern",
                file.name_format
            )));
        }

        Ok(())
    }
}
