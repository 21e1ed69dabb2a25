//! Typed configuration schema structures.
//!
//! Peripheral data for services consuming the merged document: the core
//! reader never interprets these fields. Callers deserialize the YAML bytes
//! returned by [`read`](crate::read) into these (or their own) structs and
//! validate them afterwards.

pub mod database;
pub mod queue;
pub mod service;
pub mod web;

pub use database::Database;
pub use queue::{MessageQueue, NsqQueue};
pub use service::{ApplicationInfo, InternalService};
pub use web::WebServer;

use thiserror::Error;

/// A single problem found while validating a configuration section.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("config/{section}: {problem}")]
pub struct ValidationError {
    pub section: &'static str,
    pub problem: String,
}

impl ValidationError {
    pub fn new(section: &'static str, problem: impl Into<String>) -> Self {
        ValidationError { section, problem: problem.into() }
    }
}

/// Validation for a deserialized configuration section. Collects every
/// problem instead of stopping at the first.
pub trait Validate {
    fn validate(&self) -> Vec<ValidationError>;
}
