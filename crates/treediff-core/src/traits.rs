//! Seams between the traversal engine and its I/O collaborators
//!
//! Both traits are object safe so the walker can hold `&dyn` references
//! and tests can swap in in-memory implementations.

use crate::error::Result;
use crate::types::{ObjectId, TreeEntry};
use async_trait::async_trait;

/// Read access to the hosted repository
#[async_trait]
pub trait RemoteAccessor: Send + Sync {
    /// List a directory's immediate children, or describe a single file as a
    /// one-element listing
    async fn list_or_get(&self, path: &str) -> Result<Vec<TreeEntry>>;

    /// Download raw bytes from an entry's locator
    async fn fetch_raw(&self, locator: &str) -> Result<Vec<u8>>;

    /// Resolve an object hash to its decoded text
    async fn fetch_by_hash(&self, hash: &ObjectId) -> Result<String>;
}

/// Objects available without a network round-trip
///
/// The working tree is expected to be a git checkout, so the blob for a
/// committed local file can be read back by hash.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read a blob as text
    async fn read_blob(&self, hash: &ObjectId) -> Result<String>;
}
