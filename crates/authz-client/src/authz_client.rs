//! High-level client: configuration plus the active authenticator.
//!
//! ## Security
//!
//! - The authenticator is never printed by Debug output
//! - Request bodies and contexts are skipped in tracing spans

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::auth::Authenticator;
use crate::client::AuthzHttpClient;
use crate::config::ClientOptions;
use crate::context::RequestContext;
use crate::error::Result;
use crate::request::RequestMethod;
use crate::response::RawResponse;
use crate::transport::{ReqwestTransport, Transport};

/// Authorization service client.
///
/// Owns the resolved options, the shared transport, and exactly one active
/// authenticator. Each logical call takes a snapshot of the authenticator
/// when it starts, so [`set_auth`](Self::set_auth) never changes the
/// credentials of a call already in flight. Per-call state such as a
/// context-carried token travels in the [`RequestContext`] argument.
///
/// # Example
///
/// ```rust,ignore
/// use permkit_authz_client::{AuthzClient, ClientOptions, RequestContext};
/// use permkit_authz_auth::BearerTokenAuth;
///
/// let client = AuthzClient::new(BearerTokenAuth::new("token"), ClientOptions::default())?;
///
/// let subjects: Vec<String> = client
///     .get_json(&RequestContext::new(), "/api/permissions/expand/document/doc1/viewer")
///     .await?;
/// ```
#[derive(Clone)]
pub struct AuthzClient<T = ReqwestTransport> {
    http: AuthzHttpClient<T>,
    auth: Arc<dyn Authenticator>,
}

impl<T> fmt::Debug for AuthzClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthzClient")
            .field("base_url", &self.http.options().base_url)
            .field("auth", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl AuthzClient<ReqwestTransport> {
    /// Create a client with the given authenticator and options.
    ///
    /// Zero-valued option fields fall back to their defaults.
    pub fn new(auth: impl Authenticator + 'static, options: ClientOptions) -> Result<Self> {
        Ok(Self {
            http: AuthzHttpClient::new(options)?,
            auth: Arc::new(auth),
        })
    }

    /// Create a client with default options.
    pub fn with_defaults(auth: impl Authenticator + 'static) -> Result<Self> {
        Self::new(auth, ClientOptions::default())
    }
}

impl<T: Transport> AuthzClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(
        auth: impl Authenticator + 'static,
        options: ClientOptions,
        transport: T,
    ) -> Self {
        Self {
            http: AuthzHttpClient::with_transport(options, transport),
            auth: Arc::new(auth),
        }
    }

    /// Replace the active authenticator.
    ///
    /// Calls already in flight keep the authenticator they started with.
    pub fn set_auth(&mut self, auth: impl Authenticator + 'static) {
        self.auth = Arc::new(auth);
    }

    /// Replace the active authenticator with a shared one.
    pub fn set_shared_auth(&mut self, auth: Arc<dyn Authenticator>) {
        self.auth = auth;
    }

    /// The active authenticator.
    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        Arc::clone(&self.auth)
    }

    /// Get the resolved options.
    pub fn options(&self) -> &ClientOptions {
        self.http.options()
    }

    /// Get the underlying executor.
    pub fn http(&self) -> &AuthzHttpClient<T> {
        &self.http
    }

    /// Build the full URL for a path.
    pub fn url(&self, path: &str) -> String {
        self.http.url(path)
    }

    // =========================================================================
    // Base Execution
    // =========================================================================

    /// Execute a request and return the raw successful response.
    pub async fn execute<B>(
        &self,
        ctx: &RequestContext,
        method: RequestMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<RawResponse>
    where
        B: Serialize + ?Sized + Sync,
    {
        let auth = self.authenticator();
        self.http.execute(auth.as_ref(), ctx, method, path, body).await
    }

    /// Execute a request and decode the JSON response.
    ///
    /// An empty success body decodes to `R::default()`.
    pub async fn execute_json<B, R>(
        &self,
        ctx: &RequestContext,
        method: RequestMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned + Default,
    {
        let auth = self.authenticator();
        let decoded = self
            .http
            .execute_json(auth.as_ref(), ctx, method, path, body)
            .await?;
        Ok(decoded.unwrap_or_default())
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    #[instrument(skip(self, ctx), fields(path = %path))]
    pub async fn get_json<R>(&self, ctx: &RequestContext, path: &str) -> Result<R>
    where
        R: DeserializeOwned + Default,
    {
        self.execute_json::<(), R>(ctx, RequestMethod::Get, path, None)
            .await
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, ctx, body), fields(path = %path))]
    pub async fn post_json<B, R>(&self, ctx: &RequestContext, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned + Default,
    {
        self.execute_json(ctx, RequestMethod::Post, path, Some(body))
            .await
    }

    /// DELETE request with a JSON body; the response body is ignored.
    #[instrument(skip(self, ctx, body), fields(path = %path))]
    pub async fn delete_json<B>(&self, ctx: &RequestContext, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.execute(ctx, RequestMethod::Delete, path, Some(body))
            .await
            .map(|_| ())
    }
}
