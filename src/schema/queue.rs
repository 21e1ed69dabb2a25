//! Message queue settings.

use serde::{Deserialize, Serialize};

use super::{Validate, ValidationError};

const SECTION: &str = "queue";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageQueue {
    pub nsq: NsqQueue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NsqQueue {
    pub enable: bool,
    pub nsqd_port: u16,
    pub lookupd_port: u16,
    pub nsqd_host: String,
    pub lookupd_host: String,
    pub log_level: String,
}

impl NsqQueue {
    pub fn lookupd_addr(&self) -> String {
        format!("{}:{}", self.lookupd_host, self.lookupd_port)
    }

    pub fn nsqd_addr(&self) -> String {
        format!("{}:{}", self.nsqd_host, self.nsqd_port)
    }
}

impl Validate for MessageQueue {
    fn validate(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();

        if self.nsq.enable {
            if self.nsq.nsqd_host.trim().is_empty() {
                problems.push(ValidationError::new(SECTION, "nsqd_host is empty"));
            }
            if self.nsq.lookupd_host.trim().is_empty() {
                problems.push(ValidationError::new(SECTION, "lookupd_host is empty"));
            }
        }

        problems
    }
}
