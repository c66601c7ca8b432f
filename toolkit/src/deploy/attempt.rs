//! Deploy attempt state machine

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::deploy::{DeployStatus, StatusClass};

/// Attempt state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptState {
    /// Created, no status observed yet
    Pending,

    /// Observed in-progress statuses only
    Polling,

    /// Reached a success-class status
    Succeeded,

    /// Reached a failure-class status
    Failed,

    /// Gave up waiting at the timeout bound
    Abandoned,
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AttemptState::Succeeded | AttemptState::Failed | AttemptState::Abandoned
        )
    }
}

/// Attempt event
#[derive(Debug, Clone)]
pub enum AttemptEvent {
    /// A status was read from the platform
    Observed(DeployStatus),

    /// One poll interval went by
    Waited(Duration),

    /// The timeout bound was reached
    TimedOut,
}

/// One deploy triggered on the compute platform, tracked until it settles
#[derive(Debug, Clone)]
pub struct DeployAttempt {
    id: String,
    state: AttemptState,
    history: Vec<DeployStatus>,
    elapsed: Duration,
    timeout: Duration,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl DeployAttempt {
    /// Create a new attempt in pending state
    pub fn new(id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            id: id.into(),
            state: AttemptState::Pending,
            history: Vec::new(),
            elapsed: Duration::ZERO,
            timeout,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Last observed status
    pub fn status(&self) -> Option<&DeployStatus> {
        self.history.last()
    }

    /// Every status observed, oldest first
    pub fn history(&self) -> &[DeployStatus] {
        &self.history
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Wall-clock time since the attempt started, status reads included
    pub fn wall_elapsed(&self) -> Duration {
        (Utc::now() - self.started_at).to_std().unwrap_or_default()
    }

    /// Whether the waited time or the wall-clock time has reached the timeout bound
    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.timeout || self.wall_elapsed() >= self.timeout
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: AttemptEvent) -> Result<(), String> {
        let new_state = match (self.state, &event) {
            (state, _) if state.is_terminal() => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }

            (_, AttemptEvent::Observed(status)) => {
                self.history.push(status.clone());
                match status.class() {
                    StatusClass::InProgress => AttemptState::Polling,
                    StatusClass::Success => AttemptState::Succeeded,
                    StatusClass::Failure => AttemptState::Failed,
                }
            }

            (state, AttemptEvent::Waited(interval)) => {
                self.elapsed += *interval;
                state
            }

            (_, AttemptEvent::TimedOut) => AttemptState::Abandoned,
        };

        if new_state.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
        self.state = new_state;
        Ok(())
    }
}
