//! Request executor: authenticate, send, classify, retry.

use bytes::Bytes;
use serde::Serialize;
use tracing::instrument;

use crate::auth::{into_auth_error, Authenticator};
use crate::config::ClientOptions;
use crate::context::RequestContext;
use crate::error::{is_retryable_status, Error, ErrorKind, Result};
use crate::request::{OutboundRequest, RequestMethod};
use crate::response::RawResponse;
use crate::retry::RetryPolicy;
use crate::transport::{ReqwestTransport, Transport};

/// HTTP executor for the authorization API with built-in retry and error
/// classification.
///
/// One `execute` call is one logical operation: the body is encoded once,
/// then up to `max_retries + 1` strictly sequential attempts are made.
#[derive(Debug, Clone)]
pub struct AuthzHttpClient<T = ReqwestTransport> {
    transport: T,
    options: ClientOptions,
}

impl AuthzHttpClient<ReqwestTransport> {
    /// Create an executor backed by reqwest.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let options = options.resolved();
        url::Url::parse(&options.base_url)?;
        let transport = ReqwestTransport::new(&options)?;
        Ok(Self { transport, options })
    }
}

impl<T> AuthzHttpClient<T> {
    /// Get the resolved options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the full URL for a path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.options.base_url, path)
        } else {
            format!("{}/{}", self.options.base_url, path)
        }
    }
}

impl<T: Transport> AuthzHttpClient<T> {
    /// Create an executor over a custom transport.
    pub fn with_transport(options: ClientOptions, transport: T) -> Self {
        Self {
            transport,
            options: options.resolved(),
        }
    }

    /// Execute one logical call and return the successful response.
    ///
    /// Transport failures, 5xx and 429 are retried with linear backoff. Any
    /// other 4xx, a malformed error body, or an authentication failure ends
    /// the call immediately. Cancellation of `ctx` interrupts stamping,
    /// sending, and backoff sleeps.
    #[instrument(skip(self, auth, ctx, body), fields(method = %method, path = %path))]
    pub async fn execute<B>(
        &self,
        auth: &dyn Authenticator,
        ctx: &RequestContext,
        method: RequestMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<RawResponse>
    where
        B: Serialize + ?Sized + Sync,
    {
        let payload = body.map(encode_body).transpose()?;
        let url = self.url(path);
        let policy = RetryPolicy::from_options(&self.options);
        let logger = self.options.logger();
        let mut last_error: Option<Error> = None;

        for attempt in 0..policy.max_attempts() {
            if attempt > 0 {
                ctx.run(tokio::time::sleep(policy.delay_for(attempt))).await?;
                logger.debug(&format!("retrying request attempt={} url={}", attempt, url));
            }

            let mut request = OutboundRequest::new(method, url.as_str());
            if let Some(ref bytes) = payload {
                request = request.json_bytes(bytes.clone());
            }

            ctx.run(auth.stamp(&mut request, ctx))
                .await?
                .map_err(into_auth_error)?;

            let response = match ctx
                .run(self.transport.send(request, self.options.timeout))
                .await?
            {
                Ok(response) => response,
                Err(err) => {
                    logger.error(&format!("request error: {} attempt={}", err, attempt));
                    last_error = Some(err);
                    continue;
                }
            };

            if response.is_success() {
                return Ok(response);
            }

            let status = response.status();
            let err = response.into_error();
            let message = match err.service_error() {
                Some(service) => service.message.clone(),
                // Unparseable error bodies are not assumed transient
                None => return Err(err),
            };

            if !is_retryable_status(status) {
                logger.error(&format!("client error status={} message={}", status, message));
                return Err(err);
            }

            logger.error(&format!(
                "server error, will retry status={} message={}",
                status, message
            ));
            last_error = Some(err);
        }

        let kind = ErrorKind::RetriesExhausted {
            attempts: policy.max_attempts(),
        };
        Err(match last_error {
            Some(last) => Error::with_source(kind, last),
            None => Error::new(kind),
        })
    }

    /// Execute and decode the success body; an empty body yields `None`.
    ///
    /// A success body that does not decode is a fatal serialization error and
    /// is never retried.
    pub async fn execute_json<B, R>(
        &self,
        auth: &dyn Authenticator,
        ctx: &RequestContext,
        method: RequestMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<R>>
    where
        B: Serialize + ?Sized + Sync,
        R: serde::de::DeserializeOwned,
    {
        let response = self.execute(auth, ctx, method, path, body).await?;
        response.json_opt()
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Bytes> {
    serde_json::to_vec(body).map(Bytes::from).map_err(Into::into)
}
