//! The read pipeline: discover, load, merge, cascade, serialize.
//!
//! One invocation walks the configuration tree, folds every qualifying file
//! into its stage's document, overlays the active stage over `defaults`, and
//! renders the result back to YAML. The pipeline is synchronous: merge order
//! is semantically significant, so files are processed one at a time in
//! discovery order.

mod options;

pub use options::{ReadOptions, DEFAULT_CONFIG_PATH};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_yaml::Mapping;

use crate::discover::discover_files;
use crate::error::ConfigError;
use crate::log::Logger;
use crate::merge::deep_merge;
use crate::stage::{FixedStage, Stage, StageName};

/// Reads the layered configuration tree for `stage` and returns the merged
/// document as YAML bytes. The caller deserializes them into its own typed
/// structure; field semantics are never interpreted here.
pub fn read(stage: &dyn Stage, opts: ReadOptions) -> Result<Vec<u8>, ConfigError> {
    Merger::new(stage.name(), opts)?.read()
}

/// Convenience wrapper for callers that already resolved the stage name.
pub fn read_from(stage: &str, config_path: impl AsRef<Path>) -> Result<Vec<u8>, ConfigError> {
    let stage = FixedStage::new(stage);
    read(&stage, ReadOptions::new().config_path(config_path.as_ref()))
}

/// Per-invocation pipeline state. Each `read` call owns its own instance;
/// the lock guards the stage documents so an instance shared across threads
/// stays safe, there is no process-wide cache.
struct Merger {
    stage: StageName,
    config_path: PathBuf,
    logger: Arc<dyn Logger>,
    configs: RwLock<BTreeMap<StageName, Mapping>>,
}

impl Merger {
    fn new(stage: StageName, opts: ReadOptions) -> Result<Self, ConfigError> {
        let config_path = opts.checked_config_path()?;
        Ok(Merger {
            stage,
            config_path,
            logger: opts.logger,
            configs: RwLock::new(BTreeMap::new()),
        })
    }

    fn read(&self) -> Result<Vec<u8>, ConfigError> {
        self.logger.debug("current stage", &[("stage", self.stage.to_string())]);
        self.logger
            .debug("config path", &[("path", self.config_path.display().to_string())]);

        let files = discover_files(&self.config_path, &self.stage).map_err(|err| {
            self.logger.error("get file list error", &[("error", err.to_string())]);
            err
        })?;

        if files.get(&StageName::defaults()).map_or(true, |list| list.is_empty()) {
            self.logger.error("defaults config is not found in file list", &[]);
            return Err(ConfigError::NoDefaults);
        }

        self.logger.debug("existing config list", &[("files", format!("{files:?}"))]);

        for (stage, paths) in &files {
            for path in paths {
                self.load_file(stage, path)?;
            }
        }

        self.resolve()
    }

    /// Loads one file and folds its contribution into the stage's running
    /// document. A file whose top-level mapping lacks the stage key targets a
    /// different stage and is skipped.
    fn load_file(&self, stage: &StageName, path: &Path) -> Result<(), ConfigError> {
        let bytes = fs::read(path).map_err(|source| {
            self.logger.error(
                "config read fail",
                &[("stage", stage.to_string()), ("file", path.display().to_string())],
            );
            ConfigError::FileRead { path: path.to_path_buf(), source }
        })?;

        let document: BTreeMap<String, Mapping> =
            serde_yaml::from_slice(&bytes).map_err(|source| {
                self.logger.error(
                    "config unmarshal fail",
                    &[("stage", stage.to_string()), ("file", path.display().to_string())],
                );
                ConfigError::Unmarshal { path: path.to_path_buf(), source }
            })?;

        let Some(contribution) = document.get(stage.as_str()) else {
            self.logger.warn(
                "file excluded from current stage (it is not for this stage)",
                &[("file", path.display().to_string()), ("stage", stage.to_string())],
            );
            return Ok(());
        };

        let mut configs = self.configs.write().expect("configs lock poisoned");
        match configs.get_mut(stage) {
            Some(running) => deep_merge(running, contribution).map_err(|source| {
                self.logger.error(
                    "config merge fail",
                    &[("stage", stage.to_string()), ("file", path.display().to_string())],
                );
                ConfigError::Merge {
                    stage: stage.clone(),
                    file: path.to_path_buf(),
                    source,
                }
            })?,
            None => {
                configs.insert(stage.clone(), contribution.clone());
            }
        }

        Ok(())
    }

    /// Overlays the active stage's document over `defaults` and serializes
    /// the result. When the active stage is `defaults` itself, or has no
    /// directory of its own, the defaults document is final as-is.
    fn resolve(&self) -> Result<Vec<u8>, ConfigError> {
        let configs = self.configs.read().expect("configs lock poisoned");

        let mut result =
            configs.get(&StageName::defaults()).cloned().ok_or(ConfigError::NoDefaults)?;

        if !self.stage.is_defaults() {
            if let Some(stage_doc) = configs.get(&self.stage) {
                deep_merge(&mut result, stage_doc).map_err(|source| {
                    self.logger
                        .error("merging with defaults error", &[("stage", self.stage.to_string())]);
                    ConfigError::Cascade { stage: self.stage.clone(), source }
                })?;
                self.logger.debug(
                    "stage config is loaded and merged with defaults",
                    &[("stage", self.stage.to_string())],
                );
            }
        }

        self.logger.debug("final config", &[("config", format!("{result:?}"))]);

        serde_yaml::to_string(&result)
            .map(String::into_bytes)
            .map_err(|source| ConfigError::Serialize { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::CapturingLogger;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    #[test]
    fn test_file_keyed_for_other_stage_is_skipped_with_warning() {
        let tmp = TempDir::new().expect("tmp");
        write(tmp.path(), "defaults/a.yaml", "defaults:\n  debug: true\n");
        write(tmp.path(), "defaults/stray.yaml", "prod:\n  debug: false\n");

        let logger = Arc::new(CapturingLogger::default());
        let stage = FixedStage::new("defaults");
        let opts = ReadOptions::new().config_path(tmp.path()).logger(logger.clone());

        let bytes = read(&stage, opts).expect("read");
        let doc: Mapping = serde_yaml::from_slice(&bytes).expect("yaml");
        assert_eq!(doc.get("debug"), Some(&serde_yaml::Value::Bool(true)));

        let messages = logger.messages.lock().expect("messages lock");
        assert!(messages.iter().any(|m| m.starts_with("WARN file excluded")));
    }

    #[test]
    fn test_defaults_dir_with_only_mismatched_files_is_no_defaults() {
        let tmp = TempDir::new().expect("tmp");
        // The file is discovered, but contributes nothing to `defaults`.
        write(tmp.path(), "defaults/stray.yaml", "prod:\n  debug: false\n");

        let result = read_from("prod", tmp.path());
        assert!(matches!(result, Err(ConfigError::NoDefaults)));
    }

    #[test]
    fn test_unreadable_root_surfaces_config_path_error() {
        let tmp = TempDir::new().expect("tmp");
        let result = read_from("dev", tmp.path().join("missing"));
        assert!(matches!(result, Err(ConfigError::ConfigPath { .. })));
    }

    #[test]
    fn test_merge_failure_identifies_stage_and_file() {
        let tmp = TempDir::new().expect("tmp");
        write(tmp.path(), "defaults/a.yaml", "defaults:\n  redis:\n    port: 6379\n");
        write(tmp.path(), "defaults/b.yaml", "defaults:\n  redis: disabled\n");

        match read_from("defaults", tmp.path()) {
            Err(ConfigError::Merge { stage, file, .. }) => {
                assert_eq!(stage, StageName::defaults());
                assert!(file.ends_with("defaults/b.yaml"));
            }
            other => panic!("expected merge error, got {other:?}"),
        }
    }
}
