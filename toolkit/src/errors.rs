//! Error types for the cicd toolkit

use thiserror::Error;

/// Main error type for the toolkit
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    ApiError { status: u16, body: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Required tool '{0}' was not found on PATH")]
    ToolMissing(String),

    #[error("Not a git repository: {0}")]
    NotGitRepo(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error(
        "Service '{name}' was not found. Create it on the hosting dashboard before running a release"
    )]
    ServiceNotFound { name: String },

    #[error("Deployment {deploy_id} ended with status '{status}'")]
    DeployFailed { deploy_id: String, status: String },

    #[error("Frontend deployment failed: {0}")]
    FrontendDeployFailed(String),

    #[error("Frontend deployment finished but no deployment URL was found in its output")]
    MissingDeploymentUrl,

    #[error("Frontend error: {0}")]
    FrontendError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolkitError {
    /// Whether a poll loop may retry after this error
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ToolkitError::HttpError(_) | ToolkitError::ApiError { .. }
        )
    }
}
