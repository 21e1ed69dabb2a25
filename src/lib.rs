//! staged-config: stage-layered YAML configuration reading
//!
//! Loads a tree of YAML configuration files organized by deployment stage
//! (`defaults/`, `dev/`, `prod/`, ...) and produces one merged document for a
//! selected stage. The mandatory `defaults` stage is the base layer; the
//! selected stage's documents are deep-merged over it, later values winning
//! even when they are empty. The result is returned as YAML bytes for the
//! caller to deserialize into its own typed structures.

pub mod cli;
pub mod discover;
pub mod error;
pub mod log;
pub mod merge;
pub mod reader;
pub mod schema;
pub mod stage;

pub use error::ConfigError;
pub use log::{Logger, NoopLogger, TracingLogger};
pub use reader::{read, read_from, ReadOptions, DEFAULT_CONFIG_PATH};
pub use stage::{EnvStage, FixedStage, Stage, StageName, STAGE_ENV_KEY};
