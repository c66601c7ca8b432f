//! Deploy status models

use std::fmt;

/// Coarse classification of a deploy status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    InProgress,
    Success,
    Failure,
}

/// Status of a deploy as reported by the compute platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployStatus {
    Created,
    Queued,
    BuildInProgress,
    UpdateInProgress,
    PreDeployInProgress,
    Live,
    Deactivated,
    BuildFailed,
    UpdateFailed,
    PreDeployFailed,
    Canceled,
    TimedOut,
    /// Anything the platform reports that we do not know about
    Other(String),
}

impl DeployStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DeployStatus::Created => "created",
            DeployStatus::Queued => "queued",
            DeployStatus::BuildInProgress => "build_in_progress",
            DeployStatus::UpdateInProgress => "update_in_progress",
            DeployStatus::PreDeployInProgress => "pre_deploy_in_progress",
            DeployStatus::Live => "live",
            DeployStatus::Deactivated => "deactivated",
            DeployStatus::BuildFailed => "build_failed",
            DeployStatus::UpdateFailed => "update_failed",
            DeployStatus::PreDeployFailed => "pre_deploy_failed",
            DeployStatus::Canceled => "canceled",
            DeployStatus::TimedOut => "timed_out",
            DeployStatus::Other(s) => s,
        }
    }

    pub fn class(&self) -> StatusClass {
        match self {
            DeployStatus::Live => StatusClass::Success,
            DeployStatus::BuildFailed
            | DeployStatus::UpdateFailed
            | DeployStatus::PreDeployFailed
            | DeployStatus::Canceled
            | DeployStatus::TimedOut => StatusClass::Failure,
            _ => StatusClass::InProgress,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.class() != StatusClass::InProgress
    }
}

impl From<&str> for DeployStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "created" => DeployStatus::Created,
            "queued" => DeployStatus::Queued,
            "build_in_progress" => DeployStatus::BuildInProgress,
            "update_in_progress" => DeployStatus::UpdateInProgress,
            "pre_deploy_in_progress" => DeployStatus::PreDeployInProgress,
            "live" => DeployStatus::Live,
            "deactivated" => DeployStatus::Deactivated,
            "build_failed" => DeployStatus::BuildFailed,
            "update_failed" => DeployStatus::UpdateFailed,
            "pre_deploy_failed" => DeployStatus::PreDeployFailed,
            "canceled" | "cancelled" => DeployStatus::Canceled,
            "timed_out" | "timeout" => DeployStatus::TimedOut,
            other => DeployStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for DeployStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for DeployStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(DeployStatus::from(s.as_str()))
    }
}
