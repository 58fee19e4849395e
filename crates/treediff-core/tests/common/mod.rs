//! In-memory remote and object store shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use treediff_core::{
    blob_digest, EntryKind, Error, ObjectId, ObjectStore, RemoteAccessor, Result, TreeEntry,
};

/// Remote tree held in memory, with call counters
#[derive(Default)]
pub struct FakeRemote {
    listings: BTreeMap<String, Vec<TreeEntry>>,
    files: HashMap<String, TreeEntry>,
    blobs: HashMap<ObjectId, String>,
    raw: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
    leaf_delay: Option<Duration>,
    blocking_leaf: Option<Duration>,

    pub list_calls: AtomicUsize,
    pub blob_calls: AtomicUsize,
    pub raw_calls: AtomicUsize,
    pub listed: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

fn raw_url(path: &str) -> String {
    format!("https://raw.example.test/octo/widgets/main/{}", path)
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating listings for every ancestor directory
    pub fn file(mut self, path: &str, content: &str) -> Self {
        let sha = blob_digest(content.as_bytes());
        let entry = TreeEntry {
            path: path.to_string(),
            kind: EntryKind::File,
            sha: sha.clone(),
            download_url: Some(raw_url(path)),
        };

        self.add_to_parent(entry.clone());
        self.files.insert(path.to_string(), entry);
        self.blobs.insert(sha, content.to_string());
        self.raw.insert(raw_url(path), content.as_bytes().to_vec());
        self
    }

    /// Add a non-file entry such as a symlink or submodule
    pub fn entry(mut self, path: &str, kind: EntryKind) -> Self {
        let entry = TreeEntry {
            path: path.to_string(),
            kind,
            sha: blob_digest(path.as_bytes()),
            download_url: None,
        };
        self.add_to_parent(entry);
        self
    }

    /// Every request touching `path` fails with a 500
    pub fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    /// Sleep inside every blob and raw fetch
    pub fn with_leaf_delay(mut self, delay: Duration) -> Self {
        self.leaf_delay = Some(delay);
        self
    }

    /// Block the calling thread inside every blob and raw fetch
    pub fn with_blocking_leaf_work(mut self, work: Duration) -> Self {
        self.blocking_leaf = Some(work);
        self
    }

    fn add_to_parent(&mut self, entry: TreeEntry) {
        let (parent, _) = entry.path.rsplit_once('/').unwrap_or(("", entry.path.as_str()));
        let parent = parent.to_string();
        self.listings
            .entry(parent.clone())
            .or_default()
            .push(entry);

        if !parent.is_empty() {
            let known = self
                .listings
                .values()
                .flatten()
                .any(|e| e.path == parent && e.kind == EntryKind::Dir);
            if !known {
                let dir = TreeEntry {
                    path: parent.clone(),
                    kind: EntryKind::Dir,
                    sha: blob_digest(parent.as_bytes()),
                    download_url: None,
                };
                self.add_to_parent(dir);
            }
        }
    }

    pub fn listed_paths(&self) -> Vec<String> {
        let mut paths = self.listed.lock().clone();
        paths.sort();
        paths
    }

    fn fail_if_requested(&self, path: &str) -> Result<()> {
        if self.failing.contains(path) {
            return Err(Error::Status {
                status: 500,
                target: path.to_string(),
            });
        }
        Ok(())
    }

    async fn leaf_work(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(work) = self.blocking_leaf {
            std::thread::sleep(work);
        }
        match self.leaf_delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteAccessor for FakeRemote {
    async fn list_or_get(&self, path: &str) -> Result<Vec<TreeEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.listed.lock().push(path.to_string());
        self.fail_if_requested(path)?;

        if let Some(entries) = self.listings.get(path) {
            return Ok(entries.clone());
        }
        match self.files.get(path) {
            Some(entry) => Ok(vec![entry.clone()]),
            None => Err(Error::Status {
                status: 404,
                target: path.to_string(),
            }),
        }
    }

    async fn fetch_raw(&self, locator: &str) -> Result<Vec<u8>> {
        self.raw_calls.fetch_add(1, Ordering::SeqCst);
        self.leaf_work().await;

        let path = locator.rsplit("/main/").next().unwrap_or(locator);
        self.fail_if_requested(path)?;
        self.raw.get(locator).cloned().ok_or_else(|| Error::Status {
            status: 404,
            target: locator.to_string(),
        })
    }

    async fn fetch_by_hash(&self, hash: &ObjectId) -> Result<String> {
        self.blob_calls.fetch_add(1, Ordering::SeqCst);
        self.leaf_work().await;

        self.blobs.get(hash).cloned().ok_or_else(|| Error::Status {
            status: 404,
            target: hash.to_string(),
        })
    }
}

/// Local objects keyed by their digest
#[derive(Default)]
pub struct FakeObjects {
    blobs: HashMap<ObjectId, String>,
}

impl FakeObjects {
    pub fn with(contents: &[&str]) -> Self {
        Self {
            blobs: contents
                .iter()
                .map(|c| (blob_digest(c.as_bytes()), c.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl ObjectStore for FakeObjects {
    async fn read_blob(&self, hash: &ObjectId) -> Result<String> {
        self.blobs
            .get(hash)
            .cloned()
            .ok_or_else(|| Error::Git(format!("failed to retrieve file content for {}", hash)))
    }
}
