//! Frontend hosting driven through the `vercel` CLI

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::deploy::platform::FrontendPlatform;
use crate::deploy::resolver::EnvironmentClass;
use crate::errors::ToolkitError;

/// Options for the `vercel` CLI
#[derive(Debug)]
pub struct VercelOptions {
    /// CLI binary name or path
    pub binary: String,

    /// Access token, the CLI login is used when absent
    pub token: Option<SecretString>,

    /// Frontend directory the CLI runs in
    pub working_dir: PathBuf,

    /// Variable carrying the backend address
    pub backend_url_var: String,
}

impl Default for VercelOptions {
    fn default() -> Self {
        Self {
            binary: "vercel".to_string(),
            token: None,
            working_dir: PathBuf::from("frontend"),
            backend_url_var: "API_BASE_URL".to_string(),
        }
    }
}

/// [`FrontendPlatform`] backed by the `vercel` CLI
pub struct VercelCli {
    options: VercelOptions,
}

impl VercelCli {
    pub fn new(options: VercelOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &VercelOptions {
        &self.options
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new(&self.options.binary);
        command.current_dir(&self.options.working_dir).args(args);
        if let Some(token) = &self.options.token {
            command.args(["--token", token.expose_secret()]);
        }
        command
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput, ToolkitError> {
        debug!("Running {} {}", self.options.binary, args.join(" "));
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;
        Ok(CommandOutput::from(output))
    }

    fn spawn_error(&self, e: std::io::Error) -> ToolkitError {
        match e.kind() {
            std::io::ErrorKind::NotFound => ToolkitError::ToolMissing(self.options.binary.clone()),
            _ => ToolkitError::FrontendError(format!(
                "Failed to run {}: {}",
                self.options.binary, e
            )),
        }
    }
}

struct CommandOutput {
    success: bool,
    combined: String,
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push('\n');
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Self {
            success: output.status.success(),
            combined,
        }
    }
}

#[async_trait]
impl FrontendPlatform for VercelCli {
    async fn check_auth(&self) -> Result<(), ToolkitError> {
        if self.options.token.is_some() {
            return Ok(());
        }
        let output = self.run(&["whoami".to_string()]).await?;
        if !output.success {
            return Err(ToolkitError::Unauthenticated(format!(
                "{} is not logged in. Run `{} login` or set VERCEL_TOKEN",
                self.options.binary, self.options.binary
            )));
        }
        Ok(())
    }

    async fn remove_env(&self, key: &str, env: EnvironmentClass) -> Result<(), ToolkitError> {
        let args = strings(&["env", "rm", key, env.as_str(), "--yes"]);
        let output = self.run(&args).await?;
        if !output.success {
            return Err(ToolkitError::FrontendError(format!(
                "env rm {} failed: {}",
                key,
                output.combined.trim()
            )));
        }
        Ok(())
    }

    async fn add_env(
        &self,
        key: &str,
        value: &str,
        env: EnvironmentClass,
    ) -> Result<(), ToolkitError> {
        let args = strings(&["env", "add", key, env.as_str()]);
        debug!("Running {} {}", self.options.binary, args.join(" "));

        let mut child = self
            .command(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(value.as_bytes()).await?;
        }
        let output = CommandOutput::from(child.wait_with_output().await?);

        if !output.success {
            return Err(ToolkitError::FrontendError(format!(
                "env add {} failed: {}",
                key,
                output.combined.trim()
            )));
        }
        Ok(())
    }

    async fn deploy(
        &self,
        env: EnvironmentClass,
        vars: &[(String, String)],
    ) -> Result<String, ToolkitError> {
        let args = deploy_args(env, vars);
        info!("Deploying frontend ({})", env);
        let output = self.run(&args).await?;

        if !output.success {
            return Err(ToolkitError::FrontendDeployFailed(
                output.combined.trim().to_string(),
            ));
        }

        extract_deployment_url(&output.combined).ok_or(ToolkitError::MissingDeploymentUrl)
    }
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

/// Arguments of the deploy command
pub fn deploy_args(env: EnvironmentClass, vars: &[(String, String)]) -> Vec<String> {
    let mut args = strings(&["deploy", "--yes"]);
    if env == EnvironmentClass::Production {
        args.push("--prod".to_string());
    }
    for (key, value) in vars {
        args.push("--build-env".to_string());
        args.push(format!("{}={}", key, value));
        args.push("--env".to_string());
        args.push(format!("{}={}", key, value));
    }
    args
}

/// Last `https://` URL appearing in the CLI output
pub fn extract_deployment_url(output: &str) -> Option<String> {
    static URL_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = URL_PATTERN.get_or_init(|| {
        Regex::new(r#"https://[^\s"'<>\]\[()]+"#).expect("URL pattern is valid")
    });

    pattern
        .find_iter(output)
        .last()
        .map(|m| m.as_str().trim_end_matches(&['.', ','][..]).to_string())
}
