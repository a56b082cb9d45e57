//! Error types for authz-auth.
//!
//! Error messages never include token values.

/// Result type alias for authz-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by a [`TokenProvider`](crate::TokenProvider).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for authz-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<BoxError>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and a boxed source.
    pub fn with_boxed_source(kind: ErrorKind, source: BoxError) -> Self {
        Self {
            kind,
            source: Some(source),
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A strategy was asked to stamp an empty token.
    #[error("{0} token is empty")]
    EmptyToken(&'static str),

    /// The request context carried no token.
    #[error("no token in request context")]
    MissingContextToken,

    /// The token provider failed.
    #[error("token provider failed: {0}")]
    Provider(String),
}

impl From<Error> for permkit_authz_client::Error {
    fn from(err: Error) -> Self {
        permkit_authz_client::Error::with_source(
            permkit_authz_client::ErrorKind::Auth(err.kind.to_string()),
            err,
        )
    }
}
