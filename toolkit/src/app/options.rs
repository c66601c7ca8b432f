//! Release and composer configuration

use std::time::Duration;

use secrecy::SecretString;

use crate::deploy::poller;
use crate::deploy::vercel::VercelOptions;
use crate::errors::ToolkitError;
use crate::storage::credentials::{load_credentials, Credentials};
use crate::storage::layout::ProjectLayout;
use crate::utils::non_blank;

pub const RENDER_API_KEY_VAR: &str = "RENDER_API_KEY";
pub const VERCEL_TOKEN_VAR: &str = "VERCEL_TOKEN";
pub const DEPLOY_TIMEOUT_VAR: &str = "DEPLOY_TIMEOUT";
pub const RENDER_API_URL_VAR: &str = "RENDER_API_URL";
pub const API_BASE_URL_VAR: &str = "API_BASE_URL";

/// Everything the release workflow needs, built once at startup
#[derive(Debug)]
pub struct ReleaseOptions {
    /// Repository layout
    pub layout: ProjectLayout,

    /// Compute platform API base URL
    pub render_api_url: String,

    /// Compute platform API key
    pub render_api_key: Option<SecretString>,

    /// Frontend CLI options
    pub vercel: VercelOptions,

    /// Deploy polling options
    pub poll: poller::Options,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        let layout = ProjectLayout::default();
        Self {
            vercel: VercelOptions {
                working_dir: layout.frontend_root(),
                ..Default::default()
            },
            layout,
            render_api_url: "https://api.render.com/v1".to_string(),
            render_api_key: None,
            poll: poller::Options::default(),
        }
    }
}

impl ReleaseOptions {
    /// Load the credentials file of `layout` and read the process environment
    pub async fn load(layout: ProjectLayout) -> Result<Self, ToolkitError> {
        let credentials = load_credentials(&layout.credentials_file()).await?;
        Self::from_sources(layout, credentials, |key| std::env::var(key).ok())
    }

    /// Build options from a credentials file and an environment lookup, the environment wins
    pub fn from_sources<F>(
        layout: ProjectLayout,
        credentials: Option<Credentials>,
        lookup: F,
    ) -> Result<Self, ToolkitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = credentials.unwrap_or_default();
        let defaults = ReleaseOptions::default();

        let render_api_key = non_blank(lookup(RENDER_API_KEY_VAR))
            .or(non_blank(credentials.render_api_key))
            .map(SecretString::from);
        let vercel_token = non_blank(lookup(VERCEL_TOKEN_VAR))
            .or(non_blank(credentials.vercel_token))
            .map(SecretString::from);

        let mut poll = defaults.poll.clone();
        if let Some(raw) = non_blank(lookup(DEPLOY_TIMEOUT_VAR)) {
            let secs: u64 = raw.parse().map_err(|_| {
                ToolkitError::ConfigError(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    DEPLOY_TIMEOUT_VAR, raw
                ))
            })?;
            poll.timeout = Duration::from_secs(secs);
        }

        let render_api_url =
            non_blank(lookup(RENDER_API_URL_VAR)).unwrap_or(defaults.render_api_url);

        Ok(Self {
            vercel: VercelOptions {
                token: vercel_token,
                working_dir: layout.frontend_root(),
                ..Default::default()
            },
            layout,
            render_api_url,
            render_api_key,
            poll,
        })
    }
}

/// Request composer server options
#[derive(Debug, Clone)]
pub struct ComposerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Base address used instead of `http://localhost:<port>`
    pub base_url_override: Option<String>,

    /// Port prefilled in the form
    pub default_port: String,
}

impl Default for ComposerOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            base_url_override: None,
            default_port: "8080".to_string(),
        }
    }
}

impl ComposerOptions {
    /// Build options from the `API_BASE_URL` variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ToolkitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url_override = non_blank(lookup(API_BASE_URL_VAR));
        if let Some(base) = &base_url_override {
            url::Url::parse(base).map_err(|e| {
                ToolkitError::ConfigError(format!("{} '{}' is invalid: {}", API_BASE_URL_VAR, base, e))
            })?;
        }

        Ok(Self {
            base_url_override,
            ..Default::default()
        })
    }
}
