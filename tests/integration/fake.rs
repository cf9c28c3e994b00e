//! In-memory transport for integration tests

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

use shelfsync::transport::{HttpResponse, HttpTransport};
use shelfsync::{ClientError, ClientResult};

pub const BASE: &str = "http://inventory.local/api";

enum Route {
    Respond(HttpResponse),
    Fail(String),
}

/// Serves canned responses per URL and records every request.
/// Unknown URLs answer 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<String>>,
    posted: Mutex<Vec<Value>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET requests block until [`release`](Self::release) is called
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1024);
        }
    }

    pub fn respond_json(&self, path: &str, status: u16, body: Value) {
        self.routes.lock().unwrap().insert(
            format!("{}{}", BASE, path),
            Route::Respond(HttpResponse::json_body(status, &body)),
        );
    }

    pub fn respond_raw(&self, path: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            format!("{}{}", BASE, path),
            Route::Respond(HttpResponse::new(status, body)),
        );
    }

    pub fn fail(&self, path: &str, message: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(format!("{}{}", BASE, path), Route::Fail(message.to_string()));
    }

    pub fn calls_to(&self, path: &str) -> usize {
        let url = format!("{}{}", BASE, path);
        self.calls.lock().unwrap().iter().filter(|call| **call == url).count()
    }

    pub fn posted(&self) -> Vec<Value> {
        self.posted.lock().unwrap().clone()
    }

    fn answer(&self, url: &str) -> ClientResult<HttpResponse> {
        match self.routes.lock().unwrap().get(url) {
            Some(Route::Respond(response)) => Ok(response.clone()),
            Some(Route::Fail(message)) => Err(ClientError::Transport(message.clone())),
            None => Ok(HttpResponse::new(404, "")),
        }
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str, _timeout: Option<Duration>) -> ClientResult<HttpResponse> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(gate) = &self.gate {
            let _permit = gate
                .acquire()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;
        }

        self.answer(url)
    }

    async fn post_json(&self, url: &str, body: &Value) -> ClientResult<HttpResponse> {
        self.calls.lock().unwrap().push(url.to_string());
        self.posted.lock().unwrap().push(body.clone());
        self.answer(url)
    }
}
