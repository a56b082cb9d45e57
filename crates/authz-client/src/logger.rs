//! Pluggable logging sink used by the request executor.
//!
//! The default sink forwards to `tracing`; install [`NoopLogger`] to silence
//! the executor entirely or supply your own implementation.

use tracing::{debug, error, info};

/// Logging capability injected through [`ClientOptions`](crate::ClientOptions).
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Forwards every message to a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "permkit_authz", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: "permkit_authz", "{}", message);
    }

    fn debug(&self, message: &str) {
        debug!(target: "permkit_authz", "{}", message);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn info(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}
