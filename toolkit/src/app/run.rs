//! Release workflow

use std::future::Future;
use std::time::Duration;

use secrecy::SecretString;
use tracing::{info, warn};

use crate::app::options::{ReleaseOptions, RENDER_API_KEY_VAR};
use crate::deploy::frontend::{release_frontend, FrontendRelease};
use crate::deploy::lookup::find_service;
use crate::deploy::platform::{FrontendPlatform, ServicePlatform};
use crate::deploy::poller::{self, deploy_and_wait, DeployOutcome, DeployReport};
use crate::deploy::resolver::resolve_service_name;
use crate::deploy::vercel::VercelCli;
use crate::deploy::{git, tooling};
use crate::errors::ToolkitError;
use crate::http::client::HttpClient;
use crate::models::target::DeploymentTarget;
use crate::storage::layout::ProjectLayout;

/// Summary of a completed release
#[derive(Debug)]
pub struct ReleaseReport {
    pub branch: String,
    pub target: DeploymentTarget,
    pub deploy: DeployReport,
    /// Backend address handed to the frontend
    pub backend_url: String,
    pub frontend: FrontendRelease,
}

impl ReleaseReport {
    /// Whether the backend deploy was abandoned at the timeout
    pub fn backend_abandoned(&self) -> bool {
        matches!(self.deploy.outcome, DeployOutcome::Abandoned { .. })
    }
}

/// What the preflight checks hand to the release
#[derive(Debug)]
pub struct Preflight {
    pub services: HttpClient,
    pub branch: String,
}

/// Checks run before anything is deployed: tools, compute credentials, frontend login, branch
pub async fn preflight<F>(
    layout: &ProjectLayout,
    tools: &[&str],
    render_api_url: &str,
    render_api_key: Option<SecretString>,
    frontend: &F,
) -> Result<Preflight, ToolkitError>
where
    F: FrontendPlatform + ?Sized,
{
    tooling::require_tools(tools).await?;

    let api_key = render_api_key.ok_or_else(|| {
        ToolkitError::Unauthenticated(format!(
            "{} is not set and {} has no render_api_key",
            RENDER_API_KEY_VAR,
            layout.credentials_file().path().display()
        ))
    })?;
    let services = HttpClient::new(render_api_url, api_key)?;

    frontend.check_auth().await?;

    let branch = git::current_branch(&layout.root_dir).await?;

    Ok(Preflight { services, branch })
}

/// Run the release workflow against the real platforms
pub async fn run(options: ReleaseOptions) -> Result<ReleaseReport, ToolkitError> {
    let ReleaseOptions {
        layout,
        render_api_url,
        render_api_key,
        vercel,
        poll,
    } = options;

    let backend_url_var = vercel.backend_url_var.clone();
    let frontend = VercelCli::new(vercel);
    let tools = ["git", frontend.options().binary.as_str()];

    let Preflight { services, branch } = preflight(
        &layout,
        &tools,
        &render_api_url,
        render_api_key,
        &frontend,
    )
    .await?;

    release(
        &services,
        &frontend,
        &layout,
        &poll,
        &backend_url_var,
        &branch,
        tokio::time::sleep,
    )
    .await
}

/// Deploy the backend for `branch`, then the frontend pointing at it
pub async fn release<S, F, Sl, Fut>(
    services: &S,
    frontend: &F,
    layout: &ProjectLayout,
    poll: &poller::Options,
    backend_url_var: &str,
    branch: &str,
    sleep_fn: Sl,
) -> Result<ReleaseReport, ToolkitError>
where
    S: ServicePlatform + ?Sized,
    F: FrontendPlatform + ?Sized,
    Sl: Fn(Duration) -> Fut,
    Fut: Future<Output = ()>,
{
    // Resolve
    let mut target = DeploymentTarget::new(resolve_service_name(branch), branch);
    info!("Branch {} resolves to service {}", branch, target.name);

    // Lookup
    let service = find_service(services, &target.name)
        .await?
        .ok_or_else(|| ToolkitError::ServiceNotFound {
            name: target.name.clone(),
        })?;
    target.locate(&service);
    info!(
        "Found service {} ({})",
        target.name,
        target.service_id.as_deref().unwrap_or_default()
    );

    // Deploy & poll
    let deploy = deploy_and_wait(services, &mut target, poll, sleep_fn).await?;
    let backend_url = match &deploy.outcome {
        DeployOutcome::Live { address } => {
            info!("Backend is live at {}", address);
            address.clone()
        }
        DeployOutcome::Failed { status } => {
            return Err(ToolkitError::DeployFailed {
                deploy_id: deploy.attempt.id().to_string(),
                status: status.to_string(),
            });
        }
        DeployOutcome::Abandoned { address, .. } => {
            warn!(
                "Backend deploy still pending after {:?}, continuing with {}",
                poll.timeout, address
            );
            address.clone()
        }
    };

    // Frontend
    let frontend = release_frontend(
        frontend,
        layout.frontend_config_file(),
        layout.frontend_config_backup(),
        backend_url_var,
        &backend_url,
        branch,
    )
    .await?;
    info!("Frontend deployed at {}", frontend.url);

    Ok(ReleaseReport {
        branch: branch.to_string(),
        target,
        deploy,
        backend_url,
        frontend,
    })
}
