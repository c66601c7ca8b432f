//! Project layout on disk

use std::path::PathBuf;

use crate::filesys::file::File;

/// Locations the release workflow reads and writes, relative to the repo root
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Repository root
    pub root_dir: PathBuf,

    /// Frontend directory, relative to the root
    pub frontend_dir: PathBuf,
}

impl ProjectLayout {
    /// Create a new layout
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            frontend_dir: PathBuf::from("frontend"),
        }
    }

    /// Optional credentials file
    pub fn credentials_file(&self) -> File {
        File::new(self.root_dir.join("deploy-credentials.json"))
    }

    /// Absolute frontend directory, the working directory of frontend tooling
    pub fn frontend_root(&self) -> PathBuf {
        self.root_dir.join(&self.frontend_dir)
    }

    /// Frontend hosting config artifact
    pub fn frontend_config_file(&self) -> File {
        File::new(self.frontend_root().join("vercel.json"))
    }

    /// Backup of the frontend config artifact
    pub fn frontend_config_backup(&self) -> File {
        self.frontend_config_file().with_suffix(".bak")
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::new(".")
    }
}
