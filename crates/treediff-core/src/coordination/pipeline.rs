//! Per-file work: compare against the local tree or download into it

use crate::diff::{count_changes, DiffStrategy};
use crate::error::{Error, Result};
use crate::file_ops::LocalTree;
use crate::git::hash_local;
use crate::traits::{ObjectStore, RemoteAccessor};
use crate::types::{ComparisonResult, DiffLine, TreeEntry};
use std::path::Path;
use std::sync::Arc;

/// Outcome of a compare leaf
#[derive(Debug)]
pub enum CompareOutcome {
    /// Nothing exists locally; no comparison was made
    MissingLocal,
    /// Digests were compared (and diffed on mismatch)
    Compared(ComparisonResult),
}

/// Hash-compare a remote file with its local counterpart
#[derive(Clone)]
pub struct Comparator {
    remote: Arc<dyn RemoteAccessor>,
    objects: Option<Arc<dyn ObjectStore>>,
    diff: &'static dyn DiffStrategy,
}

impl Comparator {
    /// Create a comparator; `objects` is required only when a digest mismatches
    pub fn new(
        remote: Arc<dyn RemoteAccessor>,
        objects: Option<Arc<dyn ObjectStore>>,
        diff: &'static dyn DiffStrategy,
    ) -> Self {
        Self {
            remote,
            objects,
            diff,
        }
    }

    /// Compare `entry` with the file at `local_path`
    ///
    /// Equal digests return immediately without any blob fetch. On mismatch
    /// the local text comes from the local object store and the remote text
    /// from the blobs endpoint.
    pub async fn compare(&self, entry: &TreeEntry, local_path: &Path) -> Result<CompareOutcome> {
        // A failed existence check falls through so hashing reports the real error
        if let Ok(false) = tokio::fs::try_exists(local_path).await {
            return Ok(CompareOutcome::MissingLocal);
        }

        let local_hash = hash_local(local_path).await?;
        if local_hash == entry.sha {
            return Ok(CompareOutcome::Compared(ComparisonResult {
                local_path: local_path.to_path_buf(),
                remote_path: entry.path.clone(),
                remote_hash: entry.sha.clone(),
                local_hash,
                matched: true,
                diff: None,
                total_diffs: 0,
            }));
        }

        let objects = self.objects.as_ref().ok_or_else(|| {
            Error::Git(
                "no git checkout found for the local tree; cannot read the local side of a mismatch"
                    .to_string(),
            )
        })?;

        let local_text = objects.read_blob(&local_hash).await.map_err(|e| {
            log::warn!("could not resolve local blob {} for {}", local_hash, entry.path);
            e
        })?;
        let remote_text = self.remote.fetch_by_hash(&entry.sha).await.map_err(|e| {
            log::warn!("could not fetch remote blob {} for {}", entry.sha, entry.path);
            e
        })?;

        let (records, total_diffs) = self.run_diff(local_text, remote_text).await?;

        Ok(CompareOutcome::Compared(ComparisonResult {
            local_path: local_path.to_path_buf(),
            remote_path: entry.path.clone(),
            remote_hash: entry.sha.clone(),
            local_hash,
            matched: false,
            diff: Some(records),
            total_diffs,
        }))
    }

    /// Diff on a blocking thread
    async fn run_diff(&self, local: String, remote: String) -> Result<(Vec<DiffLine>, usize)> {
        let diff = self.diff;
        tokio::task::spawn_blocking(move || {
            let records = diff.diff(&local, &remote);
            let total = count_changes(&records);
            (records, total)
        })
        .await
        .map_err(|e| Error::Runtime(format!("Task join error: {}", e)))
    }
}

/// Download `entry` and write it to `local_path`
pub async fn sync_file(
    remote: &dyn RemoteAccessor,
    local: &LocalTree,
    entry: &TreeEntry,
    local_path: &Path,
) -> Result<()> {
    let locator = entry
        .download_url
        .as_deref()
        .ok_or_else(|| Error::Decode(format!("{} has no download_url", entry.path)))?;

    let content = remote.fetch_raw(locator).await?;
    local.write_file(local_path, &content).await?;
    log::debug!("wrote {} ({} bytes)", local_path.display(), content.len());
    Ok(())
}
