//! Append-only daily log files.
//!
//! Each stream writes to `{directory}/{yyyyMMdd}_{file_name}`, one
//! `[HH:mm:ss] message` line per entry. Files are never truncated.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(feature = "persist")]
use serde::{Deserialize, Serialize};

/// Default directory for console log files.
pub const DEFAULT_LOG_DIRECTORY: &str = "Logs";
/// Default file name for the command history stream.
pub const DEFAULT_HISTORY_LOG_FILE: &str = "history_log.txt";
/// Default file name for the debug log stream.
pub const DEFAULT_DEBUG_LOG_FILE: &str = "debug_log.txt";

/// Current local time as `[HH:mm:ss]`.
pub fn clock_stamp() -> String {
    chrono::Local::now().format("[%H:%M:%S]").to_string()
}

/// Current local date as `yyyyMMdd`.
pub fn date_stamp() -> String {
    chrono::Local::now().format("%Y%m%d").to_string()
}

/// Settings for one log stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(Serialize, Deserialize))]
pub struct LogFileConfig {
    /// Whether entries are mirrored to disk.
    #[cfg_attr(feature = "persist", serde(default))]
    pub enabled: bool,
    /// Directory holding the daily files.
    #[cfg_attr(feature = "persist", serde(default = "default_directory"))]
    pub directory: PathBuf,
    /// File name, prefixed with the date.
    pub file_name: String,
}

#[cfg(feature = "persist")]
fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIRECTORY)
}

impl LogFileConfig {
    /// A disabled stream with the given file name in the default directory.
    pub fn named(file_name: impl Into<String>) -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            file_name: file_name.into(),
        }
    }

    /// An enabled stream writing into `directory`.
    pub fn enabled_in(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            enabled: true,
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }
}

impl Default for LogFileConfig {
    fn default() -> Self {
        Self::named(DEFAULT_HISTORY_LOG_FILE)
    }
}

/// Errors from writing a log file.
#[derive(Debug)]
pub enum LogFileError {
    /// Could not create the log directory (path, source).
    CreateDir(PathBuf, std::io::Error),
    /// Could not open or append to the file (path, source).
    Write(PathBuf, std::io::Error),
}

impl std::fmt::Display for LogFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFileError::CreateDir(path, e) => {
                write!(f, "cannot create log directory '{}': {}", path.display(), e)
            }
            LogFileError::Write(path, e) => {
                write!(f, "cannot write log file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for LogFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogFileError::CreateDir(_, e) | LogFileError::Write(_, e) => Some(e),
        }
    }
}

/// An append-only writer for one log stream.
#[derive(Debug, Clone)]
pub struct LogFile {
    directory: PathBuf,
    file_name: String,
}

impl LogFile {
    /// Create a writer. Nothing touches the disk until the first append.
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Create a writer from a stream config, or `None` if it is disabled.
    pub fn from_config(config: &LogFileConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.directory.clone(), config.file_name.clone()))
    }

    /// Get the directory holding the daily files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file for the given `yyyyMMdd` date.
    pub fn path_for(&self, date: &str) -> PathBuf {
        self.directory.join(format!("{}_{}", date, self.file_name))
    }

    /// Path of today's file.
    pub fn current_path(&self) -> PathBuf {
        self.path_for(&date_stamp())
    }

    /// Append one timestamped line to today's file.
    pub fn append(&self, message: &str) -> Result<(), LogFileError> {
        fs::create_dir_all(&self.directory)
            .map_err(|e| LogFileError::CreateDir(self.directory.clone(), e))?;

        let path = self.current_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LogFileError::Write(path.clone(), e))?;

        writeln!(file, "{} {}", clock_stamp(), message).map_err(|e| LogFileError::Write(path, e))
    }
}
