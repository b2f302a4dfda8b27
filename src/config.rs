//! Configuration for SnapKV
//!
//! A data directory plus the name of the snapshot file inside it.

use std::path::{Path, PathBuf};

use crate::error::{Result, SnapError};

/// Default snapshot file name inside the data directory
pub const DEFAULT_SNAPSHOT_FILE: &str = "save.dat";

/// Main configuration for a SnapKV instance
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the snapshot file
    /// Internal structure:
    ///   {data_dir}/
    ///     └── save.dat         (snapshot, rewritten on close)
    pub data_dir: PathBuf,

    /// Snapshot file name, resolved against `data_dir`
    pub snapshot_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./snapkv_data"),
            snapshot_file: DEFAULT_SNAPSHOT_FILE.to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Config with default settings rooted at `path`
    pub fn with_dir(path: impl Into<PathBuf>) -> Self {
        Self::builder().data_dir(path).build()
    }

    /// Full path of the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Reject settings that cannot name a file inside `data_dir`
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_file.is_empty() {
            return Err(SnapError::Config("snapshot file name is empty".to_string()));
        }

        if self.snapshot_file.contains(['/', '\\']) {
            return Err(SnapError::Config(format!(
                "snapshot file name must not contain a path separator: {:?}",
                self.snapshot_file
            )));
        }

        if self.data_dir.exists() && !self.data_dir.is_dir() {
            return Err(SnapError::Config(format!(
                "data path is not a directory: {}",
                self.data_dir.display()
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the snapshot file name (default `save.dat`)
    pub fn snapshot_file(mut self, name: impl Into<String>) -> Self {
        self.config.snapshot_file = name.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
