//! Stage identity: which deployment stage a configuration read targets.
//!
//! A stage is an opaque name ("dev", "prod", ...). The reserved `defaults`
//! stage is the base layer every other stage overlays. Stage resolution is a
//! capability ([`Stage`]) so tests and callers can substitute their own source
//! without touching the merge logic.

use std::env;
use std::fmt;

/// Environment variable consulted by [`EnvStage`].
pub const STAGE_ENV_KEY: &str = "STAGE";

/// Opaque name of a deployment stage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageName(String);

impl StageName {
    /// The reserved base-layer stage name.
    pub const DEFAULTS: &'static str = "defaults";

    /// The `defaults` stage.
    pub fn defaults() -> Self {
        StageName(Self::DEFAULTS.to_string())
    }

    /// Builds a stage name, mapping the empty string to `defaults`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Self::defaults()
        } else {
            StageName(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_defaults(&self) -> bool {
        self.0 == Self::DEFAULTS
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StageName {
    fn from(name: &str) -> Self {
        StageName::new(name)
    }
}

impl From<String> for StageName {
    fn from(name: String) -> Self {
        StageName::new(name)
    }
}

/// Source of the active stage name. No error paths: resolution always yields
/// a usable name.
pub trait Stage {
    fn name(&self) -> StageName;
}

/// Stage resolved from the `STAGE` environment variable, with a fallback when
/// the variable is unset. A set-but-empty variable resolves to `defaults`.
#[derive(Debug, Clone)]
pub struct EnvStage {
    name: StageName,
}

impl EnvStage {
    /// Reads `STAGE` once, at construction time.
    pub fn from_env(fallback: &str) -> Self {
        let raw = env::var(STAGE_ENV_KEY).unwrap_or_else(|_| fallback.to_string());
        EnvStage { name: StageName::new(raw) }
    }
}

impl Stage for EnvStage {
    fn name(&self) -> StageName {
        self.name.clone()
    }
}

/// Stage fixed by the caller. Used by the CLI `--stage` flag and by tests that
/// must not depend on the process environment.
#[derive(Debug, Clone)]
pub struct FixedStage {
    name: StageName,
}

impl FixedStage {
    pub fn new(name: impl Into<String>) -> Self {
        FixedStage { name: StageName::new(name) }
    }
}

impl Stage for FixedStage {
    fn name(&self) -> StageName {
        self.name.clone()
    }
}
