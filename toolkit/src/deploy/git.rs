//! Git queries

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::errors::ToolkitError;

/// Name of the branch checked out in `repo_dir`
pub async fn current_branch(repo_dir: &Path) -> Result<String, ToolkitError> {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output()
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolkitError::ToolMissing("git".to_string()),
            _ => ToolkitError::NotGitRepo(format!("Failed to run git rev-parse: {}", e)),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ToolkitError::NotGitRepo(format!(
            "{} ({})",
            repo_dir.display(),
            stderr.trim()
        )));
    }

    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if branch.is_empty() || branch == "HEAD" {
        return Err(ToolkitError::NotGitRepo(format!(
            "{} has a detached HEAD, check out a branch first",
            repo_dir.display()
        )));
    }

    debug!("Current branch: {}", branch);
    Ok(branch)
}
