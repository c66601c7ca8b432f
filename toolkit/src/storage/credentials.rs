//! Credentials file management

use serde::{Deserialize, Serialize};

use crate::errors::ToolkitError;
use crate::filesys::file::File;

/// Platform credentials stored next to the repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// Compute hosting API key
    #[serde(default)]
    pub render_api_key: Option<String>,

    /// Frontend hosting token
    #[serde(default)]
    pub vercel_token: Option<String>,
}

/// Load the credentials file, `None` when it is absent
pub async fn load_credentials(file: &File) -> Result<Option<Credentials>, ToolkitError> {
    file.read_json_opt::<Credentials>().await.map_err(|e| {
        ToolkitError::ConfigError(format!(
            "Unable to read credentials file {}: {}",
            file.path().display(),
            e
        ))
    })
}
