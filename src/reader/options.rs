//! Options for a single read invocation.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::log::{Logger, NoopLogger};

/// Used when no configuration root is supplied.
pub const DEFAULT_CONFIG_PATH: &str = "./configuration";

/// Builder-style options for [`read`](crate::read).
///
/// The default configuration root is an explicit value here, not package
/// state: every invocation carries its own copy.
#[derive(Clone)]
pub struct ReadOptions {
    pub(crate) config_path: PathBuf,
    pub(crate) logger: Arc<dyn Logger>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            logger: Arc::new(NoopLogger),
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration root directory.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Sets the logger the pipeline reports through.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Trims trailing separators, falls back to [`DEFAULT_CONFIG_PATH`] on an
    /// empty path, and verifies the root exists as a directory.
    pub(crate) fn checked_config_path(&self) -> Result<PathBuf, ConfigError> {
        let raw = self.config_path.to_string_lossy();
        let trimmed = raw.trim_end_matches(['/', '\\']);
        let path = if trimmed.is_empty() {
            PathBuf::from(DEFAULT_CONFIG_PATH)
        } else {
            PathBuf::from(trimmed)
        };

        let meta = std::fs::metadata(&path)
            .map_err(|source| ConfigError::ConfigPath { path: path.clone(), source })?;
        if !meta.is_dir() {
            return Err(ConfigError::ConfigPath {
                path,
                source: io::Error::other("not a directory"),
            });
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_existing_path_passes() {
        let tmp = TempDir::new().expect("tmp");
        let opts = ReadOptions::new().config_path(tmp.path());
        assert_eq!(opts.checked_config_path().expect("path"), tmp.path());
    }

    #[test]
    fn test_trailing_separators_trimmed() {
        let tmp = TempDir::new().expect("tmp");
        let with_slash = format!("{}//", tmp.path().display());
        let opts = ReadOptions::new().config_path(with_slash);
        assert_eq!(opts.checked_config_path().expect("path"), tmp.path());
    }

    #[test]
    fn test_missing_path_fails() {
        let tmp = TempDir::new().expect("tmp");
        let opts = ReadOptions::new().config_path(tmp.path().join("nope"));
        assert!(matches!(opts.checked_config_path(), Err(ConfigError::ConfigPath { .. })));
    }

    #[test]
    fn test_file_path_is_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("file.yaml");
        fs::write(&file, "defaults: {}\n").expect("write");
        let opts = ReadOptions::new().config_path(&file);
        assert!(matches!(opts.checked_config_path(), Err(ConfigError::ConfigPath { .. })));
    }

    #[test]
    fn test_empty_path_falls_back_to_default() {
        let opts = ReadOptions::new().config_path("");
        // The default path does not exist in the test environment; the
        // fallback itself must still have been applied.
        match opts.checked_config_path() {
            Err(ConfigError::ConfigPath { path, .. }) => {
                assert_eq!(path, PathBuf::from(DEFAULT_CONFIG_PATH));
            }
            other => panic!("expected ConfigPath error, got {other:?}"),
        }
    }
}
