//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};
use unisite::api::{FetchError, Fetcher, RequestDescriptor};
use unisite::config::{ApiConfig, Config};

/// Config pointing at `base_url` with short timeouts.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
        ..ApiConfig::default()
    };
    config
}

/// One read waiting for the test to decide its outcome.
pub struct PendingCall {
    pub descriptor: RequestDescriptor,
    respond_to: oneshot::Sender<Result<Value, FetchError>>,
}

impl PendingCall {
    pub fn respond(self, result: Result<Value, FetchError>) {
        let _ = self.respond_to.send(result);
    }

    pub fn ok(self, body: Value) {
        self.respond(Ok(body));
    }

    pub fn fail(self, status: u16, message: &str) {
        self.respond(Err(FetchError::Http {
            status,
            message: message.to_string(),
        }));
    }

    /// True once nothing is waiting for this call's answer any more.
    pub fn is_abandoned(&self) -> bool {
        self.respond_to.is_closed()
    }

    /// Resolve when nothing is waiting for this call's answer any more.
    pub async fn abandoned(&mut self) {
        self.respond_to.closed().await;
    }

    pub fn page(&self) -> Option<u32> {
        self.descriptor
            .query()
            .iter()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
    }
}

/// Fetcher whose reads settle only when the test says so, in any order.
pub struct ScriptedFetcher {
    calls: mpsc::UnboundedSender<PendingCall>,
}

impl ScriptedFetcher {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<PendingCall>) {
        let (calls, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { calls }), receiver)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, descriptor: &RequestDescriptor) -> Result<Value, FetchError> {
        let (respond_to, response) = oneshot::channel();
        self.calls
            .send(PendingCall {
                descriptor: descriptor.clone(),
                respond_to,
            })
            .map_err(|_| FetchError::Network {
                message: "script closed".to_string(),
            })?;
        response.await.map_err(|_| FetchError::Network {
            message: "call dropped".to_string(),
        })?
    }
}

/// Body of one list page with items `{"id": n}`.
pub fn page_body(total: u64, page: u32, limit: u32, ids: &[u64]) -> Value {
    let data: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
    json!({"total": total, "page": page, "limit": limit, "data": data})
}

/// Let spawned reads run until they have reported back.
pub async fn yield_to_tasks() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}
