//! HTTP server settings.

use serde::{Deserialize, Serialize};

use super::{Validate, ValidationError};

const SECTION: &str = "web_server";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebServer {
    pub host: String,
    pub port: u16,
    pub mode: String,
    pub has_cors: bool,
    pub compress: bool,
    pub debug: bool,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub idle_timeout: u64,
    pub shutdown_timeout: u64,
    pub max_conn_per_ip: u32,
    pub max_req_per_conn: u32,
}

impl WebServer {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for WebServer {
    fn validate(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();

        if self.host.trim().is_empty() {
            problems.push(ValidationError::new(SECTION, "host is empty"));
        }
        if self.port == 0 {
            problems.push(ValidationError::new(SECTION, "port is zero"));
        }

        problems
    }
}
