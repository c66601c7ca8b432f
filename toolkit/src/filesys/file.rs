//! File operations

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::ToolkitError;

/// A file wrapper with path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Create a new file reference
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file with `suffix` appended to the file name
    pub fn with_suffix(&self, suffix: &str) -> File {
        let mut name = self.path.as_os_str().to_owned();
        name.push(suffix);
        File::new(name)
    }

    /// Check if the file exists
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Check if the directory holding the file exists
    pub async fn parent_exists(&self) -> bool {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::metadata(parent)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false),
            _ => true,
        }
    }

    /// Read file contents as string
    pub async fn read_string(&self) -> Result<String, ToolkitError> {
        Ok(fs::read_to_string(&self.path).await?)
    }

    /// Read file as JSON
    pub async fn read_json<T: DeserializeOwned>(&self) -> Result<T, ToolkitError> {
        let contents = self.read_string().await?;
        let value = serde_json::from_str(&contents)?;
        Ok(value)
    }

    /// Read file as JSON, `None` when it does not exist
    pub async fn read_json_opt<T: DeserializeOwned>(&self) -> Result<Option<T>, ToolkitError> {
        if !self.exists().await {
            return Ok(None);
        }
        self.read_json().await.map(Some)
    }

    /// Write string to file
    pub async fn write_string(&self, contents: &str) -> Result<(), ToolkitError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Write JSON to file
    pub async fn write_json<T: Serialize>(&self, value: &T) -> Result<(), ToolkitError> {
        let mut contents = serde_json::to_string_pretty(value)?;
        contents.push('\n');
        self.write_string(&contents).await
    }

    /// Copy this file over `target`
    pub async fn copy_to(&self, target: &File) -> Result<(), ToolkitError> {
        fs::copy(&self.path, &target.path).await?;
        Ok(())
    }

    /// Move this file over `target`
    pub async fn rename_to(&self, target: &File) -> Result<(), ToolkitError> {
        fs::rename(&self.path, &target.path).await?;
        Ok(())
    }

    /// Delete the file
    pub async fn delete(&self) -> Result<(), ToolkitError> {
        if self.exists().await {
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}
