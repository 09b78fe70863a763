//! File-backed sink writing dated, permission-controlled log files

use super::LogSink;
use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use crate::record::LogRecord;
use chrono::format::StrftimeItems;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[cfg(unix)]
use std::path::Path;

/// Appends records as JSON lines under `base_directory/directory`, one file
/// per distinct rendering of the name format (per day by default).
#[derive(Debug, Clone)]
pub struct FileLogger {
    base_directory: PathBuf,
    directory: String,
    name_format: String,
    extension: String,
    mode: u32,
    owner: Option<String>,
    group: Option<String>,
    pending: Vec<LogRecord>,
}

impl FileLogger {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            directory: "command".to_string(),
            name_format: "%Y-%m-%d".to_string(),
            extension: "log".to_string(),
            mode: 0o666,
            owner: None,
            group: None,
            pending: Vec::new(),
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            base_directory: config.base_directory.clone(),
            directory: config.directory.clone(),
            name_format: config.file.name_format.clone(),
            extension: config.file.extension.clone(),
            mode: config.file.mode,
            owner: config.file.owner.clone(),
            group: config.file.group.clone(),
            pending: Vec::new(),
        }
    }

    pub fn with_base_directory(mut self, base_directory: impl Into<PathBuf>) -> Self {
        self.base_directory = base_directory.into();
        self
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    /// strftime pattern for the file stem.
    pub fn with_file_name_format(mut self, format: impl Into<String>) -> Self {
        self.name_format = format.into();
        self
    }

    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_file_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_file_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Path the next flush will append to.
    ///
    /// Fails with [`Error::Config`] when the name format is not a valid
    /// strftime pattern, so a bad builder value surfaces as an error
    /// instead of a formatting panic.
    pub fn log_path(&self) -> Result<PathBuf> {
        let items = StrftimeItems::new(&self.name_format).parse().map_err(|_| {
            Error::Config(format!(
                "file name_format `{}` is not a valid strftime pattern",
                self.name_format
            ))
        })?;

        let stem = Local::now().format_with_items(items.into_iter()).to_string();
        Ok(self
            .base_directory
            .join(&self.directory)
            .join(format!("{stem}.{}", self.extension)))
    }

    #[cfg(unix)]
    fn apply_permissions(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(self.mode))?;
        self.apply_ownership(path)
    }

    #[cfg(unix)]
    fn apply_ownership(&self, path: &Path) -> Result<()> {
        if self.owner.is_none() && self.group.is_none() {
            return Ok(());
        }

        let uid = match &self.owner {
            Some(name) => Some(
                nix::unistd::User::from_name(name)
                    .map_err(|e| Error::Io(e.into()))?
                    .ok_or_else(|| Error::Config(format!("unknown log file owner `{name}`")))?
                    .uid,
            ),
            None => None,
        };
        let gid = match &self.group {
            Some(name) => Some(
                nix::unistd::Group::from_name(name)
                    .map_err(|e| Error::Io(e.into()))?
                    .ok_or_else(|| Error::Config(format!("unknown log file group `{name}`")))?
                    .gid,
            ),
            None => None,
        };

        nix::unistd::chown(path, uid, gid).map_err(|e| Error::Io(e.into()))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn apply_permissions(&self, _path: &std::path::Path) -> Result<()> {
        Ok(())
    }
}

impl LogSink for FileLogger {
    fn add(&mut self, record: LogRecord) {
        self.pending.push(record);
    }

    fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let path = self.log_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        debug!(
            "appending {} record(s) to {}",
            self.pending.len(),
            path.display()
        );

        let mut lines = Vec::with_capacity(self.pending.len());
        for record in &self.pending {
            lines.push(record.to_line()?);
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        for line in &lines {
            writeln!(file, "{line}")?;
        }
        file.flush()?;

        self.apply_permissions(&path)?;
        self.pending.clear();
        Ok(())
    }
}
