//! Wire transport: sends one attempt and buffers the response.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use crate::config::ClientOptions;
use crate::error::{Error, ErrorKind, Result};
use crate::request::OutboundRequest;
use crate::response::RawResponse;

/// Sends a single HTTP attempt.
///
/// Implementations must be safe to share across concurrent calls; the
/// executor never issues two attempts of the same logical call at once.
pub trait Transport: Send + Sync {
    /// Send `request`, giving up after `timeout`.
    fn send(
        &self,
        request: OutboundRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// reqwest-backed transport with a shared connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport using the pool knobs from `options`.
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(options.timeout)
            .pool_max_idle_per_host(options.max_conns_per_host)
            .pool_idle_timeout(options.max_idle_conn_duration)
            .user_agent(&options.user_agent)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner })
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest, timeout: Duration) -> Result<RawResponse> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url)
            .timeout(timeout);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, headers, body))
    }
}
