//! Seams between the release workflow and the hosting platforms

use async_trait::async_trait;
use platform_api::models::{Deploy, ServiceListEntry};

use crate::deploy::resolver::EnvironmentClass;
use crate::errors::ToolkitError;
use crate::http::client::HttpClient;

/// Compute hosting platform the backend is deployed to
#[async_trait]
pub trait ServicePlatform: Send + Sync {
    /// One page of services matching `name`, starting after `cursor`
    async fn list_services(
        &self,
        name: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ServiceListEntry>, ToolkitError>;

    /// Start a new deploy. Every call creates a new deploy.
    async fn trigger_deploy(&self, service_id: &str) -> Result<Deploy, ToolkitError>;

    async fn get_deploy(&self, service_id: &str, deploy_id: &str)
        -> Result<Deploy, ToolkitError>;
}

#[async_trait]
impl ServicePlatform for HttpClient {
    async fn list_services(
        &self,
        name: &str,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ServiceListEntry>, ToolkitError> {
        self.list_services_page(name, cursor, limit).await
    }

    async fn trigger_deploy(&self, service_id: &str) -> Result<Deploy, ToolkitError> {
        HttpClient::trigger_deploy(self, service_id).await
    }

    async fn get_deploy(
        &self,
        service_id: &str,
        deploy_id: &str,
    ) -> Result<Deploy, ToolkitError> {
        HttpClient::get_deploy(self, service_id, deploy_id).await
    }
}

/// Frontend hosting platform
#[async_trait]
pub trait FrontendPlatform: Send + Sync {
    /// Fail with `Unauthenticated` when the platform cannot be used
    async fn check_auth(&self) -> Result<(), ToolkitError>;

    /// Remove a project environment variable
    async fn remove_env(&self, key: &str, env: EnvironmentClass) -> Result<(), ToolkitError>;

    /// Add a project environment variable
    async fn add_env(
        &self,
        key: &str,
        value: &str,
        env: EnvironmentClass,
    ) -> Result<(), ToolkitError>;

    /// Deploy the project with `vars` set at build time and runtime, returning the deployment URL
    async fn deploy(
        &self,
        env: EnvironmentClass,
        vars: &[(String, String)],
    ) -> Result<String, ToolkitError>;
}
