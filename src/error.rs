//! Error taxonomy for configuration reads.
//!
//! Every variant is fatal to the single `read` call: there is no partial or
//! degraded configuration, and no retries. Variants carry the stage name and
//! file path needed to diagnose a failure without re-tracing the walk.

use std::path::PathBuf;

use thiserror::Error;

use crate::merge::MergeError;
use crate::stage::StageName;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration root does not exist or is not a directory.
    #[error("config path `{}`: {source}", .path.display())]
    ConfigPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No files contributed to the `defaults` stage. The reader refuses to
    /// produce a configuration without a base layer.
    #[error("no default config")]
    NoDefaults,

    /// The directory walk itself failed (permissions, broken path).
    #[error("configuration walk failed: {source}")]
    Walk {
        #[source]
        source: walkdir::Error,
    },

    #[error("config file `{}` read fail: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not valid YAML, or not shaped as a stage-keyed mapping of mappings.
    #[error("config file `{}` unmarshal fail: {source}", .path.display())]
    Unmarshal {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Incompatible value shapes while folding a file into its stage document.
    #[error("merging configs[{stage}] with `{}` fail: {source}", .file.display())]
    Merge {
        stage: StageName,
        file: PathBuf,
        #[source]
        source: MergeError,
    },

    /// Incompatible value shapes while overlaying a stage over `defaults`.
    #[error("merging stage `{stage}` with defaults fail: {source}")]
    Cascade {
        stage: StageName,
        #[source]
        source: MergeError,
    },

    #[error("final config serialize fail: {source}")]
    Serialize {
        #[source]
        source: serde_yaml::Error,
    },
}
