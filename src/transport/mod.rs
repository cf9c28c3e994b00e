//! HTTP transport used by the shelf services
//!
//! Services only see [`HttpTransport`], so tests can swap the network for
//! a mock or an in-memory fake.

pub mod http;

pub use http::ReqwestTransport;

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::error::ClientResult;

/// Fully-read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase ("Not Found"), when known
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    /// Response with a JSON body
    pub fn json_body(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json(&self) -> ClientResult<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Minimal HTTP client interface
///
/// Transport-level failures (connection refused, timeout, ...) are errors;
/// any status code the server answers with is a successful `HttpResponse`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// `GET url`, with an optional timeout overriding the transport default
    async fn get(&self, url: &str, timeout: Option<Duration>) -> ClientResult<HttpResponse>;

    /// `POST url` with a JSON body
    async fn post_json(&self, url: &str, body: &Value) -> ClientResult<HttpResponse>;
}
