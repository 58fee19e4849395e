//! Entry point for one traversal run

use crate::config::RepositoryDescriptor;
use crate::coordination::group::join_tasks;
use crate::coordination::limiter::LeafLimiter;
use crate::coordination::walker::TreeWalker;
use crate::diff::strategy_for;
use crate::error::Result;
use crate::file_ops::LocalTree;
use crate::output::Reporter;
use crate::patterns::IgnoreFilter;
use crate::traits::{ObjectStore, RemoteAccessor};
use crate::types::RunOptions;
use std::sync::Arc;

/// Runs one traversal per requested root, each root on its own task
pub struct Orchestrator<'a> {
    descriptor: &'a RepositoryDescriptor,
    options: &'a RunOptions,
    remote: Arc<dyn RemoteAccessor>,
    objects: Option<Arc<dyn ObjectStore>>,
    reporter: Arc<dyn Reporter>,
    ignore: Arc<IgnoreFilter>,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator without a local object store
    pub fn new(
        descriptor: &'a RepositoryDescriptor,
        options: &'a RunOptions,
        remote: Arc<dyn RemoteAccessor>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            descriptor,
            options,
            remote,
            objects: None,
            reporter,
            ignore: Arc::new(IgnoreFilter::new(descriptor.ignore.iter().cloned())),
        }
    }

    /// Local object store used to read the local side of a mismatch
    pub fn with_object_store(mut self, objects: Arc<dyn ObjectStore>) -> Self {
        self.objects = Some(objects);
        self
    }

    /// Roots for this run: the trimmed override if not blank, else `files`
    pub fn roots(&self, path_override: Option<&str>) -> Vec<String> {
        match path_override.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => vec![path.to_string()],
            None => self.descriptor.files.clone(),
        }
    }

    /// Walk every root with a fresh limiter sized from the options
    pub async fn run(&self, path_override: Option<&str>) -> Result<()> {
        let limiter = Arc::new(LeafLimiter::new(self.options.max_parallel));
        self.run_with_limiter(path_override, limiter).await
    }

    /// Walk every root sharing `limiter`
    ///
    /// Returns once every root has finished, with the first error (or all of
    /// them under the aggregate policy).
    pub async fn run_with_limiter(
        &self,
        path_override: Option<&str>,
        limiter: Arc<LeafLimiter>,
    ) -> Result<()> {
        let roots = self.roots(path_override);
        if roots.is_empty() {
            log::warn!("no paths to process: descriptor lists no files and no path was given");
            return Ok(());
        }

        log::info!(
            "processing {} root(s) of {} in {:?} mode (max {} parallel)",
            roots.len(),
            self.descriptor.name,
            self.options.mode,
            limiter.bound()
        );

        let walker = TreeWalker::new(
            self.remote.clone(),
            self.objects.clone(),
            strategy_for(self.options.diff_algorithm),
            self.reporter.clone(),
            limiter,
            self.ignore.clone(),
            LocalTree::new(&self.options.root_dir),
            self.options.mode,
            self.options.error_policy,
        );

        let handles: Vec<_> = roots
            .into_iter()
            .filter(|root| {
                let ignored = walker.skip_ignored(root);
                if ignored {
                    log::warn!("root {} matches an ignore rule, skipping", root);
                }
                !ignored
            })
            .map(|root| {
                let walker = walker.clone();
                tokio::spawn(async move {
                    walker
                        .expand(root.clone())
                        .await
                        .map_err(|e| e.context("fetch", root))
                })
            })
            .collect();

        join_tasks(handles, self.options.error_policy).await
    }
}
