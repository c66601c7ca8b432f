//! Deploy API client

use platform_api::models::{Deploy, TriggerDeployRequest};

use crate::errors::ToolkitError;
use crate::http::client::HttpClient;

impl HttpClient {
    /// Start a new deploy of a service
    pub async fn trigger_deploy(&self, service_id: &str) -> Result<Deploy, ToolkitError> {
        let path = format!("/services/{}/deploys", service_id);
        self.post(&path, &TriggerDeployRequest::default()).await
    }

    /// Get a deploy of a service
    pub async fn get_deploy(
        &self,
        service_id: &str,
        deploy_id: &str,
    ) -> Result<Deploy, ToolkitError> {
        let path = format!("/services/{}/deploys/{}", service_id, deploy_id);
        self.get(&path, &[]).await
    }
}
