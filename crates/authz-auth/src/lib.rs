//! # permkit-authz-auth
//!
//! Credential strategies for the permkit authorization API.
//!
//! ## Security
//!
//! - Tokens are redacted in Debug output
//! - Error messages never include token values
//! - Every strategy refuses to stamp an empty token
//!
//! ## Supported Strategies
//!
//! - **[`BearerTokenAuth`]** - A fixed token, e.g. a service API key
//! - **[`OAuthTokenAuth`]** - A fixed OAuth access token obtained out of band
//! - **[`DynamicTokenAuth`]** - A token fetched from a [`TokenProvider`] on every attempt
//! - **[`ContextTokenAuth`]** - The token carried by each call's `RequestContext`
//!
//! Each strategy stamps exactly one header, `Authorization: Bearer <token>`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use permkit_authz_auth::{BearerTokenAuth, ContextTokenAuth};
//! use permkit_authz_client::{AuthzClient, ClientOptions, RequestContext};
//!
//! let mut client = AuthzClient::new(BearerTokenAuth::new("api-key"), ClientOptions::default())?;
//!
//! // Forward the end user's token instead
//! client.set_auth(ContextTokenAuth::new());
//! let ctx = RequestContext::new().with_token(user_token);
//! ```

mod bearer;
mod context;
mod error;
mod provider;

pub use bearer::{BearerTokenAuth, OAuthTokenAuth};
pub use context::ContextTokenAuth;
pub use error::{BoxError, Error, ErrorKind, Result};
pub use provider::{DynamicTokenAuth, FnTokenProvider, TokenProvider};
