//! Service identity and internal service client settings.

use serde::{Deserialize, Serialize};

use super::{Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationInfo {
    pub name: String,
    pub alias: String,
    pub version: String,
    pub about: String,
    pub docs: String,
    pub contacts: String,
    pub copyright: String,
}

/// Settings for a call-out to a sibling internal service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalService {
    pub enable: bool,
    pub debug: bool,
    pub gzip_content: bool,
    pub url: String,
    pub version: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Validate for InternalService {
    fn validate(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();

        if self.enable && self.url.trim().is_empty() {
            problems.push(ValidationError::new("internal_service", "url is empty"));
        }

        problems
    }
}
