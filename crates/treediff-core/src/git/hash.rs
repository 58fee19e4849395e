//! Git blob hashing for local content

use crate::error::{Error, Result};
use crate::types::ObjectId;
use sha1::{Digest, Sha1};
use std::path::Path;

/// Git object id of `content` as a blob: `sha1("blob <len>\0" + content)`
pub fn blob_digest(content: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content);
    ObjectId::from_digest(&hasher.finalize())
}

/// Hash a local file the way the remote hashes blobs
///
/// Read and digest run on a blocking thread. The digest covers exactly the
/// bytes read, so a file growing between stat and read cannot skew the
/// header length.
pub async fn hash_local(path: &Path) -> Result<ObjectId> {
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let content = std::fs::read(&path).map_err(|source| Error::LocalIo {
            path: path.clone(),
            source,
        })?;
        Ok(blob_digest(&content))
    })
    .await
    .map_err(|e| Error::Runtime(format!("Task join error: {}", e)))?
}
