//! API models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a paginated service listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceListEntry {
    /// Cursor pointing just past this entry
    pub cursor: String,
    pub service: Service,
}

/// Service record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub service_type: Option<String>,
    #[serde(default)]
    pub suspended: Option<String>,
    #[serde(default)]
    pub service_details: Option<ServiceDetails>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Service {
    /// Public URL of the service, when the platform reports one
    pub fn url(&self) -> Option<&str> {
        self.service_details
            .as_ref()
            .and_then(|details| details.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Service details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Deploy trigger request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDeployRequest {
    /// `clear` or `do_not_clear`
    pub clear_cache: String,
}

impl Default for TriggerDeployRequest {
    fn default() -> Self {
        Self {
            clear_cache: "do_not_clear".to_string(),
        }
    }
}

/// Deploy record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deploy {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}
