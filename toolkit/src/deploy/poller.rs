//! Deploy trigger and status polling

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::deploy::attempt::{AttemptEvent, AttemptState, DeployAttempt};
use crate::deploy::platform::ServicePlatform;
use crate::errors::ToolkitError;
use crate::models::deploy::DeployStatus;
use crate::models::target::{DeploymentTarget, TargetStatus};

/// Poll options
#[derive(Debug, Clone)]
pub struct Options {
    /// Delay between two status reads
    pub interval: Duration,

    /// Give up waiting once this much time went by
    pub timeout: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(900),
        }
    }
}

/// How a deploy attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The deploy went live
    Live { address: String },

    /// The platform reported a failure-class status
    Failed { status: DeployStatus },

    /// Timed out without a terminal status, the deploy may still finish remotely
    Abandoned {
        last_status: Option<DeployStatus>,
        address: String,
    },
}

/// Result of [`deploy_and_wait`]
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub attempt: DeployAttempt,
    pub outcome: DeployOutcome,
}

/// Trigger a deploy of `target` and poll it until it settles or the timeout is reached
pub async fn deploy_and_wait<P, S, F>(
    platform: &P,
    target: &mut DeploymentTarget,
    options: &Options,
    sleep_fn: S,
) -> Result<DeployReport, ToolkitError>
where
    P: ServicePlatform + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let service_id = target
        .service_id
        .clone()
        .ok_or_else(|| ToolkitError::Internal(format!("Target {} was not located", target.name)))?;

    let deploy = platform.trigger_deploy(&service_id).await?;
    info!(
        "Triggered deploy {} of {} (status: {})",
        deploy.id, target.name, deploy.status
    );
    target.status = TargetStatus::Deploying;

    let mut attempt = DeployAttempt::new(deploy.id.clone(), options.timeout);
    attempt
        .process(AttemptEvent::Observed(DeployStatus::from(deploy.status.as_str())))
        .map_err(ToolkitError::Internal)?;

    while !attempt.state().is_terminal() {
        if attempt.is_expired() {
            attempt
                .process(AttemptEvent::TimedOut)
                .map_err(ToolkitError::Internal)?;
            break;
        }

        sleep_fn(options.interval).await;
        attempt
            .process(AttemptEvent::Waited(options.interval))
            .map_err(ToolkitError::Internal)?;

        match platform.get_deploy(&service_id, attempt.id()).await {
            Ok(deploy) => {
                let status = DeployStatus::from(deploy.status.as_str());
                debug!(
                    "Deploy {} status: {} ({}s elapsed)",
                    attempt.id(),
                    status,
                    attempt.elapsed().as_secs()
                );
                attempt
                    .process(AttemptEvent::Observed(status))
                    .map_err(ToolkitError::Internal)?;
            }
            Err(e) if e.is_transient() => {
                warn!(
                    "Unable to read status of deploy {}, retrying in {:?}: {}",
                    attempt.id(),
                    options.interval,
                    e
                );
            }
            Err(e) => return Err(e),
        }
    }

    let outcome = match attempt.state() {
        AttemptState::Succeeded => {
            target.status = TargetStatus::Live;
            DeployOutcome::Live {
                address: target.best_known_address(),
            }
        }
        AttemptState::Failed => {
            target.status = TargetStatus::Failed;
            DeployOutcome::Failed {
                status: attempt
                    .status()
                    .cloned()
                    .unwrap_or_else(|| DeployStatus::Other("unknown".to_string())),
            }
        }
        _ => {
            target.status = TargetStatus::Unknown;
            warn!(
                "Deploy {} did not settle within {:?}, continuing",
                attempt.id(),
                options.timeout
            );
            DeployOutcome::Abandoned {
                last_status: attempt.status().cloned(),
                address: target.best_known_address(),
            }
        }
    };

    Ok(DeployReport { attempt, outcome })
}
