//! Local working tree access

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Local mirror of the repository root
#[derive(Debug, Clone)]
pub struct LocalTree {
    root: PathBuf,
}

impl LocalTree {
    /// Tree rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Local path for a repository-relative remote path
    ///
    /// A `.` root yields the bare relative path, so `src/a.rs` stays
    /// `src/a.rs` rather than `./src/a.rs`.
    pub fn resolve(&self, remote_path: &str) -> PathBuf {
        let relative = remote_path.trim_start_matches('/');
        if self.root.as_os_str().is_empty() || self.root == Path::new(".") {
            PathBuf::from(relative)
        } else {
            self.root.join(relative)
        }
    }

    /// Write `content` to `path`, creating parent directories on demand
    pub async fn write_file(&self, path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| Error::LocalIo {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, content)
            .await
            .map_err(|source| Error::LocalIo {
                path: path.to_path_buf(),
                source,
            })
    }
}
