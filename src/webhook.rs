//! Webhook delivery of finished leads

use crate::vehicle::ApiError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Destination for finished leads
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Post a JSON payload, returning the HTTP status code
    async fn post(&self, payload: &Value) -> Result<u16, ApiError>;
}

/// Posts leads to a fixed webhook URL
#[derive(Debug, Clone)]
pub struct WebhookClient {
    url: Url,
    http: Client,
}

impl WebhookClient {
    pub fn new(url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))?;
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { url, http })
    }
}

#[async_trait]
impl LeadSink for WebhookClient {
    async fn post(&self, payload: &Value) -> Result<u16, ApiError> {
        debug!(url = %self.url, "POST lead");
        let response = self.http.post(self.url.clone()).json(payload).send().await?;
        Ok(response.status().as_u16())
    }
}
