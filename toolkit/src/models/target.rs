//! Deployment target model

use platform_api::models::Service;
use serde::Serialize;

/// Lifecycle of a target within one release run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    /// Name derived from the branch, nothing known remotely yet
    Resolved,
    /// Remote record found
    Located,
    Deploying,
    Live,
    Failed,
    /// Deploy abandoned at timeout, remote outcome not known
    Unknown,
}

/// The backend service a release deploys to
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentTarget {
    pub name: String,
    pub branch: String,
    pub service_id: Option<String>,
    pub address: Option<String>,
    pub status: TargetStatus,
}

impl DeploymentTarget {
    /// A freshly resolved target
    pub fn new(name: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            branch: branch.into(),
            service_id: None,
            address: None,
            status: TargetStatus::Resolved,
        }
    }

    /// Record the remote service found for this target
    pub fn locate(&mut self, service: &Service) {
        self.service_id = Some(service.id.clone());
        self.address = service.url().map(str::to_string);
        self.status = TargetStatus::Located;
    }

    /// Address known for the target, or the platform default built from its name
    pub fn best_known_address(&self) -> String {
        self.address
            .clone()
            .unwrap_or_else(|| default_address(&self.name))
    }
}

/// Default public address the compute platform assigns to a service
pub fn default_address(service_name: &str) -> String {
    format!("https://{}.onrender.com", service_name)
}
