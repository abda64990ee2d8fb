use std::time::Duration;

use derive_more::Display;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ApiError {
    /// request never produced a response (connect, timeout, tls)
    #[display(fmt = "network error: {}", _0)]
    Network(String),
    #[display(fmt = "server responded with status {}", _0)]
    Status(u16),
    #[display(fmt = "could not decode response: {}", _0)]
    Parse(String),
}

impl std::error::Error for ApiError {}

/// HTTP client for the absences API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self::with_client(base_url, client))
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            config.base_api.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
