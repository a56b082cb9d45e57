//! Error types for authz-client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result type alias for authz-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for authz-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    ///
    /// For [`ErrorKind::RetriesExhausted`] this is the last retryable error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error is retried by the executor.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if credential stamping failed.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Auth(_))
    }

    /// Returns true if the caller's context was cancelled or its deadline passed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled | ErrorKind::DeadlineExceeded)
    }

    /// Returns true if the retry budget was spent.
    pub fn is_retries_exhausted(&self) -> bool {
        matches!(self.kind, ErrorKind::RetriesExhausted { .. })
    }

    /// The structured service error, if the server returned one.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match &self.kind {
            ErrorKind::Service(err) => Some(err),
            _ => None,
        }
    }

    /// The last retryable error wrapped by a [`ErrorKind::RetriesExhausted`].
    pub fn last_error(&self) -> Option<&Error> {
        match self.kind {
            ErrorKind::RetriesExhausted { .. } => self
                .source
                .as_deref()
                .and_then(|source| source.downcast_ref::<Error>()),
            _ => None,
        }
    }

    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Service(err) => Some(err.status),
            ErrorKind::MalformedErrorBody { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Credential stamping failed. Never retried.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Request body could not be encoded, or a success body could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network or connection failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A single attempt exceeded the configured timeout.
    #[error("Request timeout")]
    Timeout,

    /// Structured error returned by the service.
    #[error(transparent)]
    Service(ServiceError),

    /// Non-2xx response whose body is not a structured error.
    #[error("HTTP {status}: {body}")]
    MalformedErrorBody { status: u16, body: String },

    /// All attempts failed with retryable errors.
    #[error("Max retries exceeded after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// The caller's deadline passed.
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::Transport(_) | ErrorKind::Timeout => true,
            ErrorKind::Service(err) => err.is_retryable(),
            _ => false,
        }
    }
}

/// Check if an HTTP error status is worth another attempt.
///
/// Client errors are terminal except 429.
pub fn is_retryable_status(status: u16) -> bool {
    !((400..500).contains(&status) && status != 429)
}

/// Error body returned by the authorization service.
///
/// Wire shape: `{"timestamp", "status", "error", "message", "path"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(default)]
#[error("API error {status}: {error_type} - {message} (path: {path})")]
pub struct ServiceError {
    pub timestamp: String,
    pub status: u16,
    #[serde(rename = "error")]
    pub error_type: String,
    pub message: String,
    pub path: String,
}

impl ServiceError {
    /// HTTP 403.
    pub fn is_permission_denied(&self) -> bool {
        self.status == 403
    }

    /// HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// HTTP 404.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// HTTP 400.
    pub fn is_bad_request(&self) -> bool {
        self.status == 400
    }

    /// HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Returns true for 5xx and 429.
    pub fn is_retryable(&self) -> bool {
        is_retryable_status(self.status)
    }

    /// Parse the timestamp as RFC 3339, if the server sent one.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_builder() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Serialization(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_error(status: u16) -> ServiceError {
        ServiceError {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            status,
            error_type: "Forbidden".to_string(),
            message: "Access denied".to_string(),
            path: "/api/test".to_string(),
        }
    }

    #[test]
    fn test_service_error_display() {
        let err = service_error(403);
        assert_eq!(
            err.to_string(),
            "API error 403: Forbidden - Access denied (path: /api/test)"
        );

        // Service kind is transparent
        let err = Error::new(ErrorKind::Service(service_error(403)));
        assert_eq!(
            err.to_string(),
            "API error 403: Forbidden - Access denied (path: /api/test)"
        );
    }

    #[test]
    fn test_classification_is_exact() {
        for status in [200, 400, 401, 403, 404, 429, 500, 503] {
            let err = service_error(status);
            assert_eq!(err.is_permission_denied(), status == 403, "status {status}");
            assert_eq!(err.is_unauthorized(), status == 401, "status {status}");
            assert_eq!(err.is_not_found(), status == 404, "status {status}");
            assert_eq!(err.is_bad_request(), status == 400, "status {status}");
        }
    }

    #[test]
    fn test_retryable_http_status_codes() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_status(status), "HTTP {status} should be retryable");
        }

        for status in [400, 401, 403, 404, 405, 409, 422] {
            assert!(!is_retryable_status(status), "HTTP {status} should NOT be retryable");
        }
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(Error::new(ErrorKind::Timeout).is_retryable());
        assert!(Error::new(ErrorKind::Transport("refused".into())).is_retryable());
        assert!(Error::new(ErrorKind::Service(service_error(503))).is_retryable());
        assert!(Error::new(ErrorKind::Service(service_error(429))).is_retryable());

        assert!(!Error::new(ErrorKind::Service(service_error(404))).is_retryable());
        assert!(!Error::new(ErrorKind::Auth("empty".into())).is_retryable());
        assert!(!Error::new(ErrorKind::MalformedErrorBody {
            status: 500,
            body: "oops".into()
        })
        .is_retryable());
        assert!(!Error::new(ErrorKind::Cancelled).is_retryable());
    }

    #[test]
    fn test_service_error_decodes_wire_shape() {
        let json = r#"{
            "timestamp": "2024-05-01T12:30:00Z",
            "status": 404,
            "error": "Not Found",
            "message": "no such object",
            "path": "/api/permissions/read/document/doc9"
        }"#;
        let err: ServiceError = serde_json::from_str(json).unwrap();
        assert_eq!(err.status, 404);
        assert_eq!(err.error_type, "Not Found");
        assert!(err.is_not_found());
        assert_eq!(
            err.occurred_at().map(|ts| ts.to_rfc3339()),
            Some("2024-05-01T12:30:00+00:00".to_string())
        );
    }

    #[test]
    fn test_service_error_tolerates_missing_fields() {
        let err: ServiceError = serde_json::from_str(r#"{"message":"boom"}"#).unwrap();
        assert_eq!(err.status, 0);
        assert_eq!(err.message, "boom");
        assert!(err.occurred_at().is_none());
    }

    #[test]
    fn test_last_error_of_exhaustion() {
        let last = Error::new(ErrorKind::Service(service_error(429)));
        let err = Error::with_source(ErrorKind::RetriesExhausted { attempts: 4 }, last);

        assert!(err.is_retries_exhausted());
        let last = err.last_error().expect("wrapped error");
        assert_eq!(last.service_error().map(|e| e.status), Some(429));
        assert!(err.to_string().contains("4 attempts"));

        // Only exhaustion exposes a last error
        let err = Error::with_source(
            ErrorKind::Config("bad".into()),
            Error::new(ErrorKind::Timeout),
        );
        assert!(err.last_error().is_none());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(Error::new(ErrorKind::Service(service_error(401))).status(), Some(401));
        assert_eq!(
            Error::new(ErrorKind::MalformedErrorBody {
                status: 502,
                body: "<html>".into()
            })
            .status(),
            Some(502)
        );
        assert_eq!(Error::new(ErrorKind::Timeout).status(), None);
    }

    #[test]
    fn test_cancellation_kinds() {
        assert!(Error::new(ErrorKind::Cancelled).is_cancelled());
        assert!(Error::new(ErrorKind::DeadlineExceeded).is_cancelled());
        assert!(!Error::new(ErrorKind::Timeout).is_cancelled());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Serialization(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
        assert!(err.to_string().contains("Invalid URL"));
    }
}
