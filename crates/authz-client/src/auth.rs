//! The credential-stamping seam between the executor and credential strategies.

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::error::{Error, ErrorKind, Result};
use crate::request::OutboundRequest;

/// Stamps an outbound request with credentials.
///
/// Called once per attempt with the caller's context. A successful stamp sets
/// exactly one header, `Authorization: Bearer <token>`; a failed stamp leaves
/// the request untouched and aborts the whole logical call.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn stamp(&self, request: &mut OutboundRequest, ctx: &RequestContext) -> Result<()>;
}

/// Normalize any stamping failure to [`ErrorKind::Auth`].
pub(crate) fn into_auth_error(err: Error) -> Error {
    match err.kind {
        ErrorKind::Auth(_) => err,
        _ => Error::with_source(ErrorKind::Auth(err.to_string()), err),
    }
}
