//! Branch to deployment name resolution

use std::fmt;

/// Backend service name used by the production branches
pub const PRODUCTION_SERVICE: &str = "cicd-demo-backend-prod";
pub const GAMMA_SERVICE: &str = "cicd-demo-backend-gamma";
pub const BETA_SERVICE: &str = "cicd-demo-backend-beta";
const SERVICE_PREFIX: &str = "cicd-demo-backend";

/// Frontend project name used by the production branches
pub const PRODUCTION_PROJECT: &str = "cicd-demo-frontend";
pub const GAMMA_PROJECT: &str = "cicd-demo-frontend-gamma";
pub const BETA_PROJECT: &str = "cicd-demo-frontend-beta";
const PROJECT_PREFIX: &str = "cicd-demo-frontend";

/// Known branch aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchAlias {
    Production,
    Gamma,
    Beta,
}

impl BranchAlias {
    pub fn from_branch(branch: &str) -> Option<Self> {
        match branch {
            "prod" | "production" | "main" => Some(BranchAlias::Production),
            "gamma" => Some(BranchAlias::Gamma),
            "beta" => Some(BranchAlias::Beta),
            _ => None,
        }
    }
}

/// Frontend environment a release is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentClass {
    Production,
    Preview,
}

impl EnvironmentClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentClass::Production => "production",
            EnvironmentClass::Preview => "preview",
        }
    }
}

impl fmt::Display for EnvironmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase the branch and replace every character outside `[a-z0-9]` with `-`
pub fn slugify(branch: &str) -> String {
    branch
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Backend service name for a branch
pub fn resolve_service_name(branch: &str) -> String {
    match BranchAlias::from_branch(branch) {
        Some(BranchAlias::Production) => PRODUCTION_SERVICE.to_string(),
        Some(BranchAlias::Gamma) => GAMMA_SERVICE.to_string(),
        Some(BranchAlias::Beta) => BETA_SERVICE.to_string(),
        None => format!("{}-{}", SERVICE_PREFIX, slugify(branch)),
    }
}

/// Frontend project name for a branch
pub fn resolve_project_name(branch: &str) -> String {
    match BranchAlias::from_branch(branch) {
        Some(BranchAlias::Production) => PRODUCTION_PROJECT.to_string(),
        Some(BranchAlias::Gamma) => GAMMA_PROJECT.to_string(),
        Some(BranchAlias::Beta) => BETA_PROJECT.to_string(),
        None => format!("{}-{}", PROJECT_PREFIX, slugify(branch)),
    }
}

pub fn environment_class(branch: &str) -> EnvironmentClass {
    match BranchAlias::from_branch(branch) {
        Some(BranchAlias::Production) => EnvironmentClass::Production,
        _ => EnvironmentClass::Preview,
    }
}
