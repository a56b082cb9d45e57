//! # permkit-authz-client
//!
//! Core HTTP client infrastructure for the permkit authorization service.
//!
//! This crate provides the request executor every higher-level API builds on:
//! - Automatic retry with linear backoff (`retry_delay * attempt`)
//! - Classification of transport failures, 5xx, and 429 as retryable
//! - Structured decoding of service error bodies
//! - Caller-driven cancellation and deadlines through [`RequestContext`]
//! - Connection pooling
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (permkit-authz-permissions)                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      AuthzClient                            │
//! │  - Holds options + the active Authenticator                 │
//! │  - Provides typed JSON methods (get_json, post_json, ...)   │
//! │  - Snapshots the authenticator per call                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    AuthzHttpClient                          │
//! │  - Encode once, stamp, send, classify, back off             │
//! │  - Honors RequestContext cancellation and deadlines         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Transport (reqwest)                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use permkit_authz_client::{AuthzClient, ClientOptions, RequestContext};
//! use permkit_authz_auth::BearerTokenAuth;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), permkit_authz_client::Error> {
//!     let client = AuthzClient::new(
//!         BearerTokenAuth::new("my-token"),
//!         ClientOptions::builder().with_max_retries(5).build(),
//!     )?;
//!
//!     let ctx = RequestContext::new().with_timeout(std::time::Duration::from_secs(5));
//!     let result: serde_json::Value = client
//!         .post_json(&ctx, "/api/permissions/check", &serde_json::json!({
//!             "subjectType": "user",
//!             "subjectId": "alice",
//!             "relation": "viewer",
//!             "objectNamespace": "document",
//!             "objectId": "doc1",
//!         }))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod authz_client;
mod client;
mod config;
mod context;
mod error;
mod logger;
mod request;
mod response;
mod retry;
mod transport;

pub use auth::Authenticator;
pub use authz_client::AuthzClient;
pub use client::AuthzHttpClient;
pub use config::{
    ClientOptions, ClientOptionsBuilder, DEFAULT_MAX_CONNS_PER_HOST,
    DEFAULT_MAX_IDLE_CONN_DURATION, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT,
};
pub use context::RequestContext;
pub use error::{is_retryable_status, Error, ErrorKind, Result, ServiceError};
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use request::{OutboundRequest, RequestMethod};
pub use response::RawResponse;
pub use retry::RetryPolicy;
pub use transport::{ReqwestTransport, Transport};

pub use tokio_util::sync::CancellationToken;

/// Default service endpoint
pub const DEFAULT_BASE_URL: &str = "https://accounts.ana.st";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("permkit-authz/", env!("CARGO_PKG_VERSION"));
