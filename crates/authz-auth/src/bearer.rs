//! Static token strategies.
//!
//! Both types implement custom Debug to redact the token.

use async_trait::async_trait;
use permkit_authz_client::{Authenticator, OutboundRequest, RequestContext};

use crate::error::{Error, ErrorKind, Result};

/// Stamp `Authorization: Bearer <token>`, refusing empty tokens.
pub(crate) fn stamp_bearer(
    request: &mut OutboundRequest,
    token: &str,
    strategy: &'static str,
) -> Result<()> {
    if token.is_empty() {
        return Err(Error::new(ErrorKind::EmptyToken(strategy)));
    }
    request.bearer_auth(token);
    Ok(())
}

/// Fixed bearer token, e.g. an API key issued by the service.
#[derive(Clone)]
pub struct BearerTokenAuth {
    token: String,
}

impl std::fmt::Debug for BearerTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuth")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl BearerTokenAuth {
    /// Create a strategy for the given token.
    ///
    /// An empty token is accepted here and rejected on every stamp.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns true if the token is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuth {
    async fn stamp(
        &self,
        request: &mut OutboundRequest,
        _ctx: &RequestContext,
    ) -> permkit_authz_client::Result<()> {
        stamp_bearer(request, &self.token, "bearer")?;
        Ok(())
    }
}

/// Fixed OAuth access token obtained out of band.
///
/// Stamps exactly like [`BearerTokenAuth`]; the separate type keeps the
/// credential's origin visible at call sites.
#[derive(Clone)]
pub struct OAuthTokenAuth {
    access_token: String,
}

impl std::fmt::Debug for OAuthTokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthTokenAuth")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl OAuthTokenAuth {
    /// Create a strategy for the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Set a new access token, e.g. after an out-of-band refresh.
    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = access_token.into();
    }
}

#[async_trait]
impl Authenticator for OAuthTokenAuth {
    async fn stamp(
        &self,
        request: &mut OutboundRequest,
        _ctx: &RequestContext,
    ) -> permkit_authz_client::Result<()> {
        stamp_bearer(request, &self.access_token, "oauth")?;
        Ok(())
    }
}
