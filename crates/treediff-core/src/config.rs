//! Repository descriptor loading from JSON or YAML

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default descriptor file name in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "diffs.json";

/// Remote repository and the parts of it we track
///
/// File format (JSON, or YAML with a `.yaml`/`.yml` extension):
/// ```json
/// {
///   "name": "owner/repo",
///   "branch": "main",
///   "files": ["src", "Cargo.toml"],
///   "ignore": ["fixtures", ".lock"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryDescriptor {
    /// `owner/repo` identifier
    pub name: String,
    /// Accepted for forward compatibility; requests always use the default branch
    #[serde(default)]
    pub branch: String,
    /// Root paths walked when no explicit path is given
    #[serde(default)]
    pub files: Vec<String>,
    /// Substrings; a path containing any of them is skipped with its subtree
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl RepositoryDescriptor {
    /// Read and validate a descriptor file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let descriptor = if is_yaml {
            Self::from_yaml_str(&raw)
        } else {
            Self::from_json_str(&raw)
        }
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))?;

        log::debug!(
            "loaded descriptor for {} ({} roots, {} ignore rules)",
            descriptor.name,
            descriptor.files.len(),
            descriptor.ignore.len()
        );
        Ok(descriptor)
    }

    /// Parse a JSON descriptor
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let descriptor: Self = serde_json::from_str(raw)
            .map_err(|e| Error::Config(format!("JSON error: {}", e)))?;
        descriptor.validated()
    }

    /// Parse a YAML descriptor
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let descriptor: Self = serde_yaml::from_str(raw)?;
        descriptor.validated()
    }

    /// Owner and repository parts of `name`
    pub fn owner_repo(&self) -> Result<(&str, &str)> {
        match self.name.split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok((owner, repo))
            }
            _ => Err(Error::Config(format!(
                "Invalid repository name format: '{}' (expected owner/repo)",
                self.name
            ))),
        }
    }

    fn validated(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        self.owner_repo()?;

        // Blank entries would match everything (ignore) or list the repo root (files)
        self.files.retain(|f| !f.trim().is_empty());
        self.ignore.retain(|i| !i.is_empty());

        if !self.branch.is_empty() {
            log::debug!("branch '{}' is recorded but not used to pin a ref", self.branch);
        }
        Ok(self)
    }
}
