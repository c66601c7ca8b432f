//! Frontend release step

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::deploy::platform::FrontendPlatform;
use crate::deploy::resolver::{environment_class, resolve_project_name, EnvironmentClass};
use crate::errors::ToolkitError;
use crate::filesys::file::File;

/// Result of a frontend release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendRelease {
    pub project_name: String,
    pub environment: EnvironmentClass,
    pub url: String,
}

/// Pins the project name into the hosting config artifact until restored
pub struct ConfigGuard {
    config: File,
    backup: File,
    had_original: bool,
}

impl ConfigGuard {
    /// Write `project_name` into the config, creating it or backing up the original
    pub async fn apply(
        config: File,
        backup: File,
        project_name: &str,
    ) -> Result<Self, ToolkitError> {
        if !config.parent_exists().await {
            return Err(ToolkitError::FrontendError(format!(
                "Frontend directory for {} does not exist",
                config.path().display()
            )));
        }
        let had_original = config.exists().await;

        let mut root = if had_original {
            let map = match config.read_json::<Value>().await? {
                Value::Object(map) => map,
                _ => {
                    return Err(ToolkitError::FrontendError(format!(
                        "{} is not a JSON object",
                        config.path().display()
                    )));
                }
            };
            config.copy_to(&backup).await?;
            map
        } else {
            Map::new()
        };

        root.insert("name".to_string(), Value::String(project_name.to_string()));
        let guard = Self {
            config,
            backup,
            had_original,
        };
        if let Err(e) = guard.config.write_json(&Value::Object(root)).await {
            guard.restore().await?;
            return Err(e);
        }

        Ok(guard)
    }

    /// Put the config back the way it was found
    pub async fn restore(self) -> Result<(), ToolkitError> {
        if self.had_original {
            self.backup.rename_to(&self.config).await
        } else {
            self.config.delete().await
        }
    }
}

/// Publish the backend address to the frontend project and deploy it
pub async fn release_frontend<P>(
    platform: &P,
    config: File,
    backup: File,
    backend_url_var: &str,
    backend_url: &str,
    branch: &str,
) -> Result<FrontendRelease, ToolkitError>
where
    P: FrontendPlatform + ?Sized,
{
    let environment = environment_class(branch);
    let project_name = resolve_project_name(branch);
    info!(
        "Releasing frontend project {} ({}) against {}",
        project_name, environment, backend_url
    );

    let guard = ConfigGuard::apply(config, backup, &project_name).await?;

    let result = publish(platform, environment, backend_url_var, backend_url).await;

    if let Err(e) = guard.restore().await {
        error!("Failed to restore the frontend config artifact: {}", e);
        if result.is_ok() {
            return Err(e);
        }
    }

    let url = result?;
    Ok(FrontendRelease {
        project_name,
        environment,
        url,
    })
}

async fn publish<P>(
    platform: &P,
    environment: EnvironmentClass,
    key: &str,
    backend_url: &str,
) -> Result<String, ToolkitError>
where
    P: FrontendPlatform + ?Sized,
{
    if let Err(e) = platform.remove_env(key, environment).await {
        warn!("Could not remove {} from {}: {}", key, environment, e);
    }
    platform.add_env(key, backend_url, environment).await?;

    let vars = vec![(key.to_string(), backend_url.to_string())];
    platform.deploy(environment, &vars).await
}
