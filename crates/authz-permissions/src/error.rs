//! Error types for authz-permissions.

use permkit_authz_client::ServiceError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// A request failed local validation before anything was sent.
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest(message.into()))
    }

    /// The underlying client error, if the failure came from the executor.
    pub fn client_error(&self) -> Option<&permkit_authz_client::Error> {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<permkit_authz_client::Error>())
    }

    /// The structured service error, if the server returned one.
    pub fn service_error(&self) -> Option<&ServiceError> {
        self.client_error().and_then(|err| err.service_error())
    }

    /// Returns true if the request failed local validation.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidRequest(_))
    }

    /// Returns true if credentials could not be stamped.
    pub fn is_auth_error(&self) -> bool {
        self.client_error().is_some_and(|err| err.is_auth_error())
    }

    /// Returns true if the server answered 403.
    pub fn is_permission_denied(&self) -> bool {
        self.service_error()
            .is_some_and(ServiceError::is_permission_denied)
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.service_error().is_some_and(ServiceError::is_not_found)
    }

    /// Returns true if the caller's context ended the call.
    pub fn is_cancelled(&self) -> bool {
        self.client_error().is_some_and(|err| err.is_cancelled())
    }

    /// Returns true if every attempt failed with a retryable error.
    pub fn is_retries_exhausted(&self) -> bool {
        self.client_error()
            .is_some_and(|err| err.is_retries_exhausted())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("Client error: {0}")]
    Client(String),
}

impl From<permkit_authz_client::Error> for Error {
    fn from(err: permkit_authz_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permkit_authz_client::ErrorKind as ClientErrorKind;

    fn service(status: u16) -> permkit_authz_client::Error {
        permkit_authz_client::Error::new(ClientErrorKind::Service(ServiceError {
            status,
            error_type: "Forbidden".to_string(),
            message: "denied".to_string(),
            ..Default::default()
        }))
    }

    #[test]
    fn test_invalid_request_message() {
        let err = Error::invalid("objectId is required");
        assert!(err.is_invalid_request());
        assert_eq!(err.to_string(), "invalid request: objectId is required");
        assert!(err.client_error().is_none());
    }

    #[test]
    fn test_service_predicates_pass_through() {
        let err: Error = service(403).into();
        assert!(err.is_permission_denied());
        assert!(!err.is_not_found());
        assert_eq!(err.service_error().map(|s| s.status), Some(403));

        let err: Error = service(404).into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_client_auth_error_is_auth_error() {
        let err: Error =
            permkit_authz_client::Error::new(ClientErrorKind::Auth("bearer token is empty".into()))
                .into();
        assert!(err.is_auth_error());
        assert!(!err.is_retries_exhausted());
    }
}
