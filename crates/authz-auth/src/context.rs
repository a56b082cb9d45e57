//! Tokens carried by the caller's request context.

use async_trait::async_trait;
use permkit_authz_client::{Authenticator, OutboundRequest, RequestContext};

use crate::bearer::stamp_bearer;
use crate::error::{Error, ErrorKind};

/// Stamps the token attached to each call's [`RequestContext`].
///
/// Useful for services that forward the end user's token: every call passes
/// its own context, so concurrent calls never see each other's credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextTokenAuth;

impl ContextTokenAuth {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Authenticator for ContextTokenAuth {
    async fn stamp(
        &self,
        request: &mut OutboundRequest,
        ctx: &RequestContext,
    ) -> permkit_authz_client::Result<()> {
        let token = ctx
            .token()
            .ok_or_else(|| Error::new(ErrorKind::MissingContextToken))?;
        stamp_bearer(request, token, "context")?;
        Ok(())
    }
}
