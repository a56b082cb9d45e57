//! Client configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::logger::{Logger, TracingLogger};

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default backoff unit; attempt `n` waits `n * retry_delay`.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Default connection pool size per host.
pub const DEFAULT_MAX_CONNS_PER_HOST: usize = 512;
/// Default lifetime of an idle pooled connection.
pub const DEFAULT_MAX_IDLE_CONN_DURATION: Duration = Duration::from_secs(10);

/// Configuration for the authorization client.
///
/// Zero or empty fields mean "use the default"; [`ClientOptions::resolved`]
/// fills them in field by field, so a partially populated value keeps every
/// field that was set.
#[derive(Clone)]
pub struct ClientOptions {
    /// Timeout for each individual attempt.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Linear backoff unit.
    pub retry_delay: Duration,
    /// Logging sink. `None` resolves to [`TracingLogger`].
    pub logger: Option<Arc<dyn Logger>>,
    /// Maximum pooled connections per host.
    pub max_conns_per_host: usize,
    /// How long an idle pooled connection is kept.
    pub max_idle_conn_duration: Duration,
    /// Service base URL; request paths are appended to it.
    pub base_url: String,
    /// User-Agent header value.
    pub user_agent: String,
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("logger", &self.logger.as_ref().map(|_| ".."))
            .field("max_conns_per_host", &self.max_conns_per_host)
            .field("max_idle_conn_duration", &self.max_idle_conn_duration)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            logger: Some(Arc::new(TracingLogger)),
            max_conns_per_host: DEFAULT_MAX_CONNS_PER_HOST,
            max_idle_conn_duration: DEFAULT_MAX_IDLE_CONN_DURATION,
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            user_agent: crate::USER_AGENT.to_string(),
        }
    }
}

impl ClientOptions {
    /// Create a new client options builder.
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::default()
    }

    /// Options with every field unset, ready for partial population.
    pub fn empty() -> Self {
        Self {
            timeout: Duration::ZERO,
            max_retries: 0,
            retry_delay: Duration::ZERO,
            logger: None,
            max_conns_per_host: 0,
            max_idle_conn_duration: Duration::ZERO,
            base_url: String::new(),
            user_agent: String::new(),
        }
    }

    /// Replace zero/empty fields with their defaults.
    pub fn resolved(self) -> Self {
        let defaults = Self::default();
        Self {
            timeout: non_zero(self.timeout, defaults.timeout),
            max_retries: if self.max_retries == 0 {
                defaults.max_retries
            } else {
                self.max_retries
            },
            retry_delay: non_zero(self.retry_delay, defaults.retry_delay),
            logger: self.logger.or(defaults.logger),
            max_conns_per_host: if self.max_conns_per_host == 0 {
                defaults.max_conns_per_host
            } else {
                self.max_conns_per_host
            },
            max_idle_conn_duration: non_zero(
                self.max_idle_conn_duration,
                defaults.max_idle_conn_duration,
            ),
            base_url: if self.base_url.is_empty() {
                defaults.base_url
            } else {
                self.base_url.trim_end_matches('/').to_string()
            },
            user_agent: if self.user_agent.is_empty() {
                defaults.user_agent
            } else {
                self.user_agent
            },
        }
    }

    /// The logging sink, falling back to [`TracingLogger`].
    pub fn logger(&self) -> Arc<dyn Logger> {
        self.logger
            .clone()
            .unwrap_or_else(|| Arc::new(TracingLogger))
    }
}

fn non_zero(value: Duration, default: Duration) -> Duration {
    if value.is_zero() {
        default
    } else {
        value
    }
}

/// Builder for ClientOptions.
///
/// Starts from [`ClientOptions::empty`]; `build` resolves defaults.
#[derive(Debug)]
pub struct ClientOptionsBuilder {
    options: ClientOptions,
}

impl Default for ClientOptionsBuilder {
    fn default() -> Self {
        Self {
            options: ClientOptions::empty(),
        }
    }
}

impl ClientOptionsBuilder {
    /// Set the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set the number of retries after the first attempt.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.options.max_retries = retries;
        self
    }

    /// Set the linear backoff unit.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.options.retry_delay = delay;
        self
    }

    /// Set the logging sink.
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.options.logger = Some(Arc::new(logger));
        self
    }

    /// Set the maximum pooled connections per host.
    pub fn with_max_conns_per_host(mut self, max: usize) -> Self {
        self.options.max_conns_per_host = max;
        self
    }

    /// Set how long idle pooled connections are kept.
    pub fn with_max_idle_conn_duration(mut self, duration: Duration) -> Self {
        self.options.max_idle_conn_duration = duration;
        self
    }

    /// Set the service base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.options.base_url = base_url.into();
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = user_agent.into();
        self
    }

    /// Build the resolved client options.
    pub fn build(self) -> ClientOptions {
        self.options.resolved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NoopLogger;

    #[test]
    fn test_default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.max_retries, 3);
        assert_eq!(options.retry_delay, Duration::from_secs(1));
        assert_eq!(options.max_conns_per_host, 512);
        assert_eq!(options.max_idle_conn_duration, Duration::from_secs(10));
        assert_eq!(options.base_url, "https://accounts.ana.st");
        assert!(options.logger.is_some());
        assert!(options.user_agent.contains("permkit-authz"));
    }

    #[test]
    fn test_full_options_are_kept() {
        let options = ClientOptions::builder()
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(5)
            .with_retry_delay(Duration::from_secs(2))
            .with_max_conns_per_host(100)
            .with_max_idle_conn_duration(Duration::from_secs(5))
            .with_base_url("http://localhost:8080/")
            .with_user_agent("custom-agent/1.0")
            .with_logger(NoopLogger)
            .build();

        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.max_retries, 5);
        assert_eq!(options.retry_delay, Duration::from_secs(2));
        assert_eq!(options.max_conns_per_host, 100);
        assert_eq!(options.max_idle_conn_duration, Duration::from_secs(5));
        assert_eq!(options.base_url, "http://localhost:8080");
        assert_eq!(options.user_agent, "custom-agent/1.0");
    }

    #[test]
    fn test_partial_options_merge_field_by_field() {
        let options = ClientOptions::builder()
            .with_timeout(Duration::from_secs(10))
            .build();

        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(options.retry_delay, DEFAULT_RETRY_DELAY);
        assert_eq!(options.max_conns_per_host, 512);
        assert_eq!(options.max_idle_conn_duration, DEFAULT_MAX_IDLE_CONN_DURATION);
        assert!(options.logger.is_some());
    }

    #[test]
    fn test_struct_literal_with_zero_fields_resolves() {
        let options = ClientOptions {
            max_retries: 7,
            ..ClientOptions::empty()
        }
        .resolved();

        assert_eq!(options.max_retries, 7);
        assert_eq!(options.timeout, DEFAULT_TIMEOUT);
        assert_eq!(options.base_url, crate::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_debug_hides_logger() {
        let debug = format!("{:?}", ClientOptions::default());
        assert!(debug.contains("max_retries: 3"));
        assert!(debug.contains("logger: Some(\"..\")"));
    }
}
