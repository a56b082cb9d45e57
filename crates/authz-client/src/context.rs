//! Per-call request context: cancellation, deadline, and an optional token.
//!
//! A `RequestContext` is passed explicitly to every logical call and handed
//! to the authenticator on each attempt. Nothing about it is stored on the
//! client, so concurrent calls never observe each other's context.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, ErrorKind, Result};

/// Request-scoped state for one logical call.
#[derive(Clone, Default)]
pub struct RequestContext {
    cancel: Option<CancellationToken>,
    deadline: Option<Instant>,
    token: Option<String>,
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("cancellable", &self.cancel.is_some())
            .field("deadline", &self.deadline)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RequestContext {
    /// An empty context: never cancelled, no deadline, no token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the call when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Abort the call at `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abort the call once `timeout` has elapsed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Carry a bearer token for this call.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The carried token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The cancellation token, if any.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the context has already ended.
    pub fn check(&self) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(Error::new(ErrorKind::Cancelled));
        }
        if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            return Err(Error::new(ErrorKind::DeadlineExceeded));
        }
        Ok(())
    }

    /// Resolves with the context's error once it is cancelled or expires.
    ///
    /// Never resolves for a context without cancellation or deadline.
    pub async fn done(&self) -> Error {
        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = cancelled => Error::new(ErrorKind::Cancelled),
            _ = expired => Error::new(ErrorKind::DeadlineExceeded),
        }
    }

    /// Drive `fut` to completion unless the context ends first.
    ///
    /// A context that has already ended wins over a ready future.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output> {
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            output = fut => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_context_runs_to_completion() {
        let ctx = RequestContext::new();
        assert!(ctx.check().is_ok());
        assert_eq!(ctx.run(async { 7 }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_cancelled_context_wins() {
        let cancel = CancellationToken::new();
        let ctx = RequestContext::new().with_cancellation(cancel.clone());
        cancel.cancel();

        let err = ctx.check().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Cancelled));

        let err = ctx.run(async { 7 }).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_sleep() {
        let ctx = RequestContext::new().with_timeout(Duration::from_millis(50));

        let err = ctx
            .run(tokio::time::sleep(Duration::from_secs(60)))
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DeadlineExceeded));
        assert!(ctx.check().is_err());
    }

    #[tokio::test]
    async fn test_cancel_during_run() {
        let cancel = CancellationToken::new();
        let ctx = RequestContext::new().with_cancellation(cancel.clone());

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let err = ctx.run(std::future::pending::<()>()).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let ctx = RequestContext::new().with_token("ctx-secret");
        assert_eq!(ctx.token(), Some("ctx-secret"));
        assert!(!format!("{:?}", ctx).contains("ctx-secret"));
    }
}
