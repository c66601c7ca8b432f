//! HTTP client implementation

use std::time::Duration;

use reqwest::{header, Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::ToolkitError;

/// HTTP client for the compute platform API
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: &str, api_key: SecretString) -> Result<Self, ToolkitError> {
        url::Url::parse(base_url).map_err(|e| {
            ToolkitError::ConfigError(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header(header::ACCEPT, "application/json")
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ToolkitError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let request = self.authorized(self.client.get(&url).query(query));
        let response = request.send().await?;
        Self::decode("GET", response).await
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ToolkitError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let request = self.authorized(self.client.post(&url).json(body));
        let response = request.send().await?;
        Self::decode("POST", response).await
    }

    async fn decode<T: DeserializeOwned>(
        method: &str,
        response: Response,
    ) -> Result<T, ToolkitError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP {} failed: {} - {}", method, status, body);
            return Err(ToolkitError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.json().await?;
        Ok(body)
    }
}
