//! Recursive expansion of the remote tree

use crate::coordination::group::join_tasks;
use crate::coordination::limiter::LeafLimiter;
use crate::coordination::pipeline::{sync_file, CompareOutcome, Comparator};
use crate::diff::DiffStrategy;
use crate::error::Result;
use crate::file_ops::LocalTree;
use crate::output::{Reporter, SkipReason};
use crate::patterns::IgnoreFilter;
use crate::traits::{ObjectStore, RemoteAccessor};
use crate::types::{EntryKind, ErrorPolicy, Mode, TreeEntry};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Walks one remote subtree, dispatching files to the leaf pipeline
///
/// Every retained child runs as its own task. Listings are not throttled;
/// every file operation holds a limiter permit. Each directory waits for
/// all of its children before returning. Cloning is cheap.
#[derive(Clone)]
pub struct TreeWalker {
    inner: Arc<WalkContext>,
}

struct WalkContext {
    remote: Arc<dyn RemoteAccessor>,
    comparator: Comparator,
    reporter: Arc<dyn Reporter>,
    limiter: Arc<LeafLimiter>,
    ignore: Arc<IgnoreFilter>,
    local: LocalTree,
    mode: Mode,
    policy: ErrorPolicy,
}

impl TreeWalker {
    /// Create a walker
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        remote: Arc<dyn RemoteAccessor>,
        objects: Option<Arc<dyn ObjectStore>>,
        diff: &'static dyn DiffStrategy,
        reporter: Arc<dyn Reporter>,
        limiter: Arc<LeafLimiter>,
        ignore: Arc<IgnoreFilter>,
        local: LocalTree,
        mode: Mode,
        policy: ErrorPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(WalkContext {
                comparator: Comparator::new(remote.clone(), objects, diff),
                remote,
                reporter,
                limiter,
                ignore,
                local,
                mode,
                policy,
            }),
        }
    }

    /// Whether `path` matches an ignore rule, reporting the skip if so
    pub fn skip_ignored(&self, path: &str) -> bool {
        match self.inner.ignore.matching_rule(path) {
            Some(rule) => {
                log::debug!("ignoring {} (rule '{}')", path, rule);
                self.inner.reporter.skipped(path, SkipReason::Ignored);
                true
            }
            None => false,
        }
    }

    /// List `path` and process every retained child concurrently
    pub fn expand(&self, path: String) -> BoxFuture<'static, Result<()>> {
        let walker = self.clone();
        async move {
            let entries = walker.inner.remote.list_or_get(&path).await?;

            let handles: Vec<_> = entries
                .into_iter()
                .filter(|entry| !walker.skip_ignored(&entry.path))
                .map(|entry| {
                    let child = walker.clone();
                    tokio::spawn(async move { child.dispatch(entry).await })
                })
                .collect();

            join_tasks(handles, walker.inner.policy).await
        }
        .boxed()
    }

    async fn dispatch(&self, entry: TreeEntry) -> Result<()> {
        match entry.kind {
            EntryKind::Dir => self.expand(entry.path).await,
            EntryKind::File => self.leaf(&entry).await,
            kind => {
                log::debug!("skipping {} of kind {}", entry.path, kind.as_str());
                self.inner
                    .reporter
                    .skipped(&entry.path, SkipReason::UnsupportedKind);
                Ok(())
            }
        }
    }

    async fn leaf(&self, entry: &TreeEntry) -> Result<()> {
        let ctx = &*self.inner;
        let _permit = ctx.limiter.acquire().await?;
        let local_path = ctx.local.resolve(&entry.path);

        match ctx.mode {
            Mode::Compare => match ctx.comparator.compare(entry, &local_path).await {
                Ok(CompareOutcome::Compared(result)) => {
                    ctx.reporter.compared(&result);
                    Ok(())
                }
                Ok(CompareOutcome::MissingLocal) => {
                    ctx.reporter.skipped(&entry.path, SkipReason::MissingLocal);
                    Ok(())
                }
                Err(e) => Err(e.context("compare", &entry.path)),
            },
            Mode::Sync => {
                sync_file(ctx.remote.as_ref(), &ctx.local, entry, &local_path)
                    .await
                    .map_err(|e| e.context("download", &entry.path))?;
                ctx.reporter.fetched(&entry.path, &local_path);
                Ok(())
            }
        }
    }
}
