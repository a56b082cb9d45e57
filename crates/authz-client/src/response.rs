//! Buffered HTTP responses and error-body decoding.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result, ServiceError};

/// A fully read HTTP response.
///
/// Status and body are read exactly once per attempt by the transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl RawResponse {
    /// Create a response; header names are normalized to lowercase.
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect();

        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// The raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Deserialize the body as JSON, or `None` if the body is empty.
    pub fn json_opt<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if self.body.is_empty() {
            return Ok(None);
        }
        self.json().map(Some)
    }

    /// Convert a non-success response into the matching error.
    pub fn into_error(self) -> Error {
        parse_error_response(self.status, &self.body)
    }
}

/// Decode a non-2xx body as a [`ServiceError`], or fall back to
/// [`ErrorKind::MalformedErrorBody`] with the sanitized raw text.
fn parse_error_response(status: u16, body: &[u8]) -> Error {
    // A literal `null` is an empty error, classified by the HTTP status.
    match serde_json::from_slice::<Option<ServiceError>>(body) {
        Ok(err) => {
            let mut err = err.unwrap_or_default();
            if err.status == 0 {
                err.status = status;
            }
            Error::new(ErrorKind::Service(err))
        }
        Err(decode_err) => Error::with_source(
            ErrorKind::MalformedErrorBody {
                status,
                body: sanitize_error_message(&String::from_utf8_lossy(body)),
            },
            decode_err,
        ),
    }
}

/// Sanitize an error message before it is surfaced.
///
/// Bearer credentials echoed back by a proxy are redacted and long bodies are
/// truncated to 500 bytes.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = regex_lite::Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-._~+/]+=*")
        .map(|pattern| {
            pattern
                .replace_all(message, "Bearer [REDACTED]")
                .into_owned()
        })
        .unwrap_or_else(|_| message.to_string());

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(RawResponse::new(200, HashMap::new(), "").is_success());
        assert!(RawResponse::new(204, HashMap::new(), "").is_success());
        assert!(!RawResponse::new(304, HashMap::new(), "").is_success());
        assert!(!RawResponse::new(500, HashMap::new(), "").is_success());
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let resp = RawResponse::new(200, headers, "{}");

        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_json_opt_on_empty_body() {
        let resp = RawResponse::new(200, HashMap::new(), "");
        let value: Option<serde_json::Value> = resp.json_opt().unwrap();
        assert!(value.is_none());

        let resp = RawResponse::new(200, HashMap::new(), r#"{"allowed":true}"#);
        let value: Option<serde_json::Value> = resp.json_opt().unwrap();
        assert_eq!(value.unwrap()["allowed"], true);
    }

    #[test]
    fn test_structured_error_body() {
        let body = r#"{"timestamp":"2024-01-01T00:00:00Z","status":403,"error":"Forbidden","message":"nope","path":"/api/permissions/check"}"#;
        let err = RawResponse::new(403, HashMap::new(), body).into_error();

        let service = err.service_error().expect("service error");
        assert!(service.is_permission_denied());
        assert_eq!(service.message, "nope");
    }

    #[test]
    fn test_structured_error_without_status_uses_http_status() {
        let err = RawResponse::new(503, HashMap::new(), r#"{"message":"down"}"#).into_error();
        assert_eq!(err.status(), Some(503));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_malformed_error_body() {
        let err = RawResponse::new(502, HashMap::new(), "<html>Bad Gateway</html>").into_error();

        match &err.kind {
            ErrorKind::MalformedErrorBody { status, body } => {
                assert_eq!(*status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        assert!(err.source.is_some());
        assert_eq!(err.to_string(), "HTTP 502: <html>Bad Gateway</html>");
    }

    #[test]
    fn test_empty_error_body_is_malformed() {
        let err = RawResponse::new(500, HashMap::new(), "").into_error();
        assert!(matches!(err.kind, ErrorKind::MalformedErrorBody { status: 500, .. }));
    }

    #[test]
    fn test_null_error_body_uses_http_status() {
        let err = RawResponse::new(503, HashMap::new(), "null").into_error();
        assert_eq!(err.status(), Some(503));
        assert!(err.is_retryable());
        assert!(err.service_error().is_some_and(|s| s.message.is_empty()));
    }

    #[test]
    fn test_sanitize_redacts_bearer_tokens() {
        let sanitized = sanitize_error_message("rejected header Authorization: Bearer abc.def-123==");
        assert!(sanitized.contains("Bearer [REDACTED]"), "{sanitized}");
        assert!(!sanitized.contains("abc.def-123"), "{sanitized}");
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let sanitized = sanitize_error_message(&"x".repeat(600));
        assert!(sanitized.len() < 600);
        assert!(sanitized.ends_with("...[truncated]"));

        // Multi-byte characters straddling the cut point
        let sanitized = sanitize_error_message(&"é".repeat(400));
        assert!(sanitized.ends_with("...[truncated]"));
    }

    #[test]
    fn test_sanitize_passes_through_clean_messages() {
        let msg = "relation viewer is not defined for namespace document";
        assert_eq!(sanitize_error_message(msg), msg);
    }
}
