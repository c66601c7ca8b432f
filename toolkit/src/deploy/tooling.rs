//! Required command line tools

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::ToolkitError;

/// Fail with `ToolMissing` unless `program --version` can be started
pub async fn require_tool(program: &str) -> Result<(), ToolkitError> {
    let status = Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|_| ToolkitError::ToolMissing(program.to_string()))?;

    debug!("{} --version exited with {}", program, status);
    Ok(())
}

/// Check every tool in order, stopping at the first missing one
pub async fn require_tools(programs: &[&str]) -> Result<(), ToolkitError> {
    for program in programs {
        require_tool(program).await?;
    }
    Ok(())
}
