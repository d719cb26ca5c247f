use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::descriptor::RequestDescriptor;
use crate::api::error::{application_error, body_message, FetchError};
use crate::config::ApiConfig;

/// Capability to execute one read.
///
/// Implementations make exactly one attempt per call and never retry. A
/// read whose `fetch` panics is reported to its owner as a network failure,
/// so a panic never leaves a view loading forever.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    async fn fetch(&self, descriptor: &RequestDescriptor) -> Result<Value, FetchError>;
}

/// Turn a fetched body into `T`.
///
/// A body carrying an application-level error marker fails with
/// [`FetchError::Application`] even though the transport succeeded.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    if let Some(message) = application_error(&body) {
        return Err(FetchError::Application { message });
    }
    Ok(serde_json::from_value(body)?)
}

/// [`Fetcher`] backed by a pooled `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(config.timeout_seconds.into()),
        })
    }

    async fn do_fetch(&self, descriptor: &RequestDescriptor) -> Result<Value, FetchError> {
        let url = descriptor.url().ok_or_else(|| FetchError::InvalidUrl {
            url: descriptor.endpoint().to_string(),
        })?;

        let mut builder = self.client.get(url).timeout(self.timeout);
        for (name, value) in descriptor.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = body_message(&bytes).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string()
            });
            return Err(FetchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, descriptor: &RequestDescriptor) -> Result<Value, FetchError> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("fetch", %request_id, endpoint = descriptor.endpoint());

        async {
            tracing::debug!("{}", descriptor);
            let result = self.do_fetch(descriptor).await;
            if let Err(err) = &result {
                tracing::warn!(kind = err.kind().as_str(), "{}", err);
            }
            result
        }
        .instrument(span)
        .await
    }
}
