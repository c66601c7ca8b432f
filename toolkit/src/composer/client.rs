//! Composer request execution

use std::time::Duration;

use reqwest::{header, Client};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::composer::request::RequestDescriptor;
use crate::errors::ToolkitError;

/// Prefix shown in front of transport failures
pub const ERROR_PREFIX: &str = "Received an error: ";

/// What the response panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSnapshot {
    /// Raw body of a settled response, whatever its status
    Body(String),

    /// Description of a failed call
    Error(String),
}

impl ResponseSnapshot {
    /// Text shown to the user
    pub fn display_text(&self) -> String {
        match self {
            ResponseSnapshot::Body(body) => body.clone(),
            ResponseSnapshot::Error(description) => format!("{}{}", ERROR_PREFIX, description),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResponseSnapshot::Error(_))
    }
}

/// Sends composed requests and keeps the last settled response
pub struct Composer {
    client: Client,
    base_url_override: Option<String>,
    snapshot: RwLock<Option<ResponseSnapshot>>,
}

impl Composer {
    pub fn new(base_url_override: Option<String>) -> Result<Self, ToolkitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url_override,
            snapshot: RwLock::new(None),
        })
    }

    pub fn base_url_override(&self) -> Option<&str> {
        self.base_url_override.as_deref()
    }

    /// Currently displayed response
    pub async fn snapshot(&self) -> Option<ResponseSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Send the request and store its outcome, `None` when the route is blank
    pub async fn submit(&self, request: &RequestDescriptor) -> Option<ResponseSnapshot> {
        if !request.is_submittable() {
            debug!("Ignoring submission with a blank route");
            return None;
        }

        let snapshot = self.send(request).await;
        *self.snapshot.write().await = Some(snapshot.clone());
        Some(snapshot)
    }

    async fn send(&self, request: &RequestDescriptor) -> ResponseSnapshot {
        let url = request.target_url(self.base_url_override());
        debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(http::Method::from(request.method), &url);
        if let Some(body) = request.effective_body() {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let result = async {
            let response = builder.send().await?;
            response.text().await
        }
        .await;

        match result {
            Ok(text) => ResponseSnapshot::Body(text),
            Err(e) => {
                warn!("{} {} failed: {}", request.method, url, e);
                ResponseSnapshot::Error(e.to_string())
            }
        }
    }
}
