//! Composer API models

use serde::{Deserialize, Serialize};

/// Health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Version response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// A request composed in the form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeRequest {
    /// One of GET, POST, PUT, DELETE
    pub method: String,
    pub route: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Target port on localhost, ignored when a base URL override is set
    #[serde(default)]
    pub port: Option<String>,
}

/// Result of a form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeResponse {
    /// False when the submission was dropped without issuing a request
    pub submitted: bool,
    /// Text currently shown in the response panel
    pub response: Option<String>,
}

/// Currently displayed response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub response: Option<String>,
    pub is_error: bool,
}

/// Composer settings exposed to the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerSettingsResponse {
    pub base_url_override: Option<String>,
    pub default_port: String,
    pub methods: Vec<String>,
}
