//! # permkit-authz
//!
//! A client library for a Zanzibar-style relationship authorization service.
//!
//! Permissions are stored as relation tuples (`object#relation@subject`) on a
//! remote service; this library checks, writes, deletes, reads, expands, and
//! lists them with built-in authentication, retry logic, and error handling.
//!
//! ## Security
//!
//! - Tokens are redacted in Debug output
//! - Tracing spans skip credentials and request bodies
//! - Error bodies echoed by the server are sanitized before they surface
//!
//! ## Crates
//!
//! - **permkit-authz-client** - Request executor with linear-backoff retry, cancellation, error classification
//! - **permkit-authz-auth** - Credential strategies: static bearer, static OAuth, provider-fetched, per-call context token
//! - **permkit-authz-permissions** - Typed relation-tuple operations and request validation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use permkit_authz::{BearerTokenAuth, ClientOptions, PermissionCheckRequest, PermissionsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let token = std::env::var("PERMKIT_AUTHZ_TOKEN")?;
//!     let client = PermissionsClient::new(BearerTokenAuth::new(token), ClientOptions::default())?;
//!
//!     let result = client
//!         .check_permission(&PermissionCheckRequest::new("user", "alice", "viewer", "document", "doc1"))
//!         .await?;
//!
//!     println!("allowed: {}", result.allowed);
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use permkit_authz_auth as auth;
#[cfg(feature = "client")]
pub use permkit_authz_client as client;
#[cfg(feature = "permissions")]
pub use permkit_authz_permissions as permissions;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use permkit_authz_auth::{
    BearerTokenAuth, ContextTokenAuth, DynamicTokenAuth, OAuthTokenAuth, TokenProvider,
};
#[cfg(feature = "client")]
pub use permkit_authz_client::{
    AuthzClient, ClientOptions, RequestContext, ServiceError, DEFAULT_BASE_URL,
};
#[cfg(feature = "permissions")]
pub use permkit_authz_permissions::{
    Permission, PermissionCheckRequest, PermissionCheckResponse, PermissionWriteRequest,
    PermissionsClient,
};
