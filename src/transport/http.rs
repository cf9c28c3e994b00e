//! reqwest-backed transport

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::{HttpResponse, HttpTransport};
use crate::error::{ClientError, ClientResult};

#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default per-request timeout
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shelfsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> ClientResult<HttpResponse> {
        let status = response.status();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(String::from),
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> ClientResult<HttpResponse> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> ClientResult<HttpResponse> {
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        Self::read(response).await
    }
}
