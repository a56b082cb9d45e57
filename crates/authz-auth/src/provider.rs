//! Tokens fetched on demand from a provider.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use permkit_authz_client::{Authenticator, OutboundRequest, RequestContext};
use tracing::debug;

use crate::bearer::stamp_bearer;
use crate::error::{BoxError, Error, ErrorKind};

/// Supplies a token for one attempt.
///
/// Called once per attempt with the caller's context. Implementations may
/// suspend (e.g. to refresh against an identity provider); the executor
/// abandons the fetch when the context is cancelled or its deadline passes.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self, ctx: &RequestContext) -> Result<String, BoxError>;
}

#[async_trait]
impl<P: TokenProvider + ?Sized> TokenProvider for Arc<P> {
    async fn token(&self, ctx: &RequestContext) -> Result<String, BoxError> {
        (**self).token(ctx).await
    }
}

/// [`TokenProvider`] backed by an async closure.
pub struct FnTokenProvider<F> {
    f: F,
}

impl<F, Fut> FnTokenProvider<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BoxError>> + Send,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> TokenProvider for FnTokenProvider<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BoxError>> + Send,
{
    async fn token(&self, _ctx: &RequestContext) -> Result<String, BoxError> {
        (self.f)().await
    }
}

/// Stamps whatever token the provider returns for each attempt.
pub struct DynamicTokenAuth {
    provider: Box<dyn TokenProvider>,
}

impl std::fmt::Debug for DynamicTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicTokenAuth").finish_non_exhaustive()
    }
}

impl DynamicTokenAuth {
    /// Create a strategy over a provider.
    pub fn new(provider: impl TokenProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// Create a strategy over an async closure.
    ///
    /// ```rust,ignore
    /// let auth = DynamicTokenAuth::from_fn(|| async { Ok("fresh-token".to_string()) });
    /// ```
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, BoxError>> + Send + 'static,
    {
        Self::new(FnTokenProvider::new(f))
    }
}

#[async_trait]
impl Authenticator for DynamicTokenAuth {
    async fn stamp(
        &self,
        request: &mut OutboundRequest,
        ctx: &RequestContext,
    ) -> permkit_authz_client::Result<()> {
        let token = self.provider.token(ctx).await.map_err(|err| {
            debug!("token provider failed");
            Error::with_boxed_source(ErrorKind::Provider(err.to_string()), err)
        })?;
        stamp_bearer(request, &token, "provider")?;
        Ok(())
    }
}
