//! # treediff core
//!
//! Compare or sync a local working tree against a GitHub repository through
//! the REST contents API, without cloning it.
//!
//! The engine:
//! - walks the remote tree recursively, skipping paths that contain an
//!   ignore substring before any I/O is spent on them
//! - bounds concurrent per-file work with one shared limiter while
//!   directory listings fan out freely
//! - hashes local files with git's blob framing so unchanged files cost no
//!   content transfer
//! - diffs mismatches line by line and reports them
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use treediff_core::{run, ConsoleReporter, GitHubContentsClient, Mode, RepositoryDescriptor, RunOptions};
//!
//! # async fn example() -> treediff_core::Result<()> {
//! let descriptor = RepositoryDescriptor::load("diffs.json")?;
//! let remote = GitHubContentsClient::from_env(descriptor.name.clone())?;
//! let options = RunOptions {
//!     mode: Mode::Compare,
//!     ..Default::default()
//! };
//! let reporter = ConsoleReporter::from_options(&options, true);
//!
//! run(&descriptor, &options, None, Arc::new(remote), Arc::new(reporter)).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod coordination;
pub mod diff;
pub mod error;
pub mod file_ops;
pub mod git;
pub mod http;
pub mod output;
pub mod patterns;
pub mod traits;
pub mod types;

use std::sync::Arc;

pub use config::{RepositoryDescriptor, DEFAULT_CONFIG_FILE};
pub use coordination::{LeafLimiter, Orchestrator};
pub use error::{Error, ErrorKind, Result};
pub use git::{blob_digest, hash_local, GitObjectStore};
pub use http::GitHubContentsClient;
pub use output::{CollectingReporter, ConsoleReporter, JsonReporter, Reporter};
pub use traits::{ObjectStore, RemoteAccessor};
pub use types::{
    ComparisonResult, DiffAlgorithm, DiffLine, EntryKind, ErrorPolicy, LineTag, Mode, ObjectId,
    RunOptions, TreeEntry, DEFAULT_MAX_PARALLEL,
};

/// Run one traversal against `remote`
///
/// In compare mode the git repository enclosing `options.root_dir` serves as
/// the local object store. Without one, matching and missing files are still
/// handled; only a digest mismatch fails, since its local text is unreadable.
pub async fn run(
    descriptor: &RepositoryDescriptor,
    options: &RunOptions,
    path_override: Option<&str>,
    remote: Arc<dyn RemoteAccessor>,
    reporter: Arc<dyn Reporter>,
) -> Result<()> {
    let mut orchestrator = Orchestrator::new(descriptor, options, remote, reporter);

    if options.mode == Mode::Compare {
        match GitObjectStore::discover(&options.root_dir) {
            Ok(objects) => {
                log::debug!("local object store at {}", objects.path().display());
                orchestrator = orchestrator.with_object_store(Arc::new(objects));
            }
            Err(e) => log::debug!(
                "no git checkout at {}, mismatched files cannot be diffed: {}",
                options.root_dir.display(),
                e
            ),
        }
    }

    orchestrator.run(path_override).await
}
