//! Injectable logging capability for the read pipeline.
//!
//! The reader reports progress through this trait instead of logging
//! directly, so embedding services can route messages into their own
//! observability stack. [`NoopLogger`] is the default; [`TracingLogger`]
//! forwards to the `tracing` macros.

use std::fmt;

/// Structured fields attached to a log message.
pub type Fields<'a> = &'a [(&'a str, String)];

/// Minimal logging contract: a free-form message plus structured arguments.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str, fields: Fields<'_>);
    fn warn(&self, message: &str, fields: Fields<'_>);
    fn error(&self, message: &str, fields: Fields<'_>);
}

/// Discards every message. The default when no logger is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _fields: Fields<'_>) {}
    fn warn(&self, _message: &str, _fields: Fields<'_>) {}
    fn error(&self, _message: &str, _fields: Fields<'_>) {}
}

/// Forwards messages to the `tracing` macros under the `staged_config` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str, fields: Fields<'_>) {
        tracing::debug!(target: "staged_config", fields = ?FieldsDisplay(fields), "{message}");
    }

    fn warn(&self, message: &str, fields: Fields<'_>) {
        tracing::warn!(target: "staged_config", fields = ?FieldsDisplay(fields), "{message}");
    }

    fn error(&self, message: &str, fields: Fields<'_>) {
        tracing::error!(target: "staged_config", fields = ?FieldsDisplay(fields), "{message}");
    }
}

struct FieldsDisplay<'a>(Fields<'a>);

impl fmt::Debug for FieldsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.0 {
            map.entry(key, value);
        }
        map.finish()
    }
}

/// Captures messages for assertions. Test-only.
#[cfg(test)]
#[derive(Default)]
pub struct CapturingLogger {
    pub messages: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl Logger for CapturingLogger {
    fn debug(&self, message: &str, _fields: Fields<'_>) {
        self.messages.lock().expect("messages lock").push(format!("DEBUG {message}"));
    }

    fn warn(&self, message: &str, _fields: Fields<'_>) {
        self.messages.lock().expect("messages lock").push(format!("WARN {message}"));
    }

    fn error(&self, message: &str, _fields: Fields<'_>) {
        self.messages.lock().expect("messages lock").push(format!("ERROR {message}"));
    }
}
