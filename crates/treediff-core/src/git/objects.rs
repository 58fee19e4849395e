//! Local blob lookup through libgit2

use crate::error::{Error, Result};
use crate::traits::ObjectStore;
use crate::types::ObjectId;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Object store backed by the git repository containing the working tree
///
/// git2::Repository is not Send/Sync, so only the path is stored and every
/// lookup reopens the repository on a blocking thread.
#[derive(Debug, Clone)]
pub struct GitObjectStore {
    path: PathBuf,
}

impl GitObjectStore {
    /// Discover the repository enclosing `path`
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let git_path =
            git2::Repository::discover_path(path.as_ref(), &[] as &[&std::ffi::OsStr])
                .map_err(|e| {
                    Error::Git(format!(
                        "no git repository at or above {}: {}",
                        path.as_ref().display(),
                        e.message()
                    ))
                })?;
        let _repo = git2::Repository::open(&git_path)?;

        Ok(Self { path: git_path })
    }

    /// Path of the discovered `.git` directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_blob_blocking(path: &Path, hash: &ObjectId) -> Result<String> {
        let repo = git2::Repository::open(path)?;
        let oid = git2::Oid::from_str(hash.as_str())
            .map_err(|e| Error::Git(format!("Invalid SHA '{}': {}", hash, e.message())))?;

        let blob = repo.find_blob(oid).map_err(|e| {
            Error::Git(format!(
                "failed to retrieve file content for {}: {}",
                hash,
                e.message()
            ))
        })?;

        Ok(String::from_utf8_lossy(blob.content()).into_owned())
    }
}

#[async_trait]
impl ObjectStore for GitObjectStore {
    async fn read_blob(&self, hash: &ObjectId) -> Result<String> {
        let path = self.path.clone();
        let hash = hash.clone();

        tokio::task::spawn_blocking(move || Self::read_blob_blocking(&path, &hash))
            .await
            .map_err(|e| Error::Runtime(format!("Task join error: {}", e)))?
    }
}
