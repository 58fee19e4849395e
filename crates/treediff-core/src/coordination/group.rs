//! Join-all barrier for sibling tasks

use crate::error::{Error, Result};
use crate::types::ErrorPolicy;
use futures::future::join_all;
use std::future::Future;
use tokio::task::JoinHandle;

/// Run every child to completion, then fold their outcomes by `policy`.
///
/// Nothing is cancelled: a failing child does not stop its siblings, and
/// this returns only once all of them have finished.
pub async fn join_children<I, F>(children: I, policy: ErrorPolicy) -> Result<()>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<()>>,
{
    let results = join_all(children).await;
    fold_outcomes(results, policy)
}

/// Await spawned children, then fold their outcomes by `policy`.
///
/// Handles are awaited in dispatch order; a panicked child becomes a
/// runtime error. Dropping a handle never aborts its task.
pub async fn join_tasks<I>(handles: I, policy: ErrorPolicy) -> Result<()>
where
    I: IntoIterator<Item = JoinHandle<Result<()>>>,
{
    let children = handles.into_iter().map(|handle| async move {
        handle
            .await
            .map_err(|e| Error::Runtime(format!("Task join error: {}", e)))?
    });
    join_children(children, policy).await
}

/// Fold child results: first error in dispatch order, or all of them
pub fn fold_outcomes(results: Vec<Result<()>>, policy: ErrorPolicy) -> Result<()> {
    match policy {
        ErrorPolicy::FirstError => match results.into_iter().find_map(|r| r.err()) {
            Some(err) => Err(err),
            None => Ok(()),
        },
        ErrorPolicy::Aggregate => {
            let mut errors = Vec::new();
            for err in results.into_iter().filter_map(|r| r.err()) {
                match err {
                    Error::Multiple(nested) => errors.extend(nested),
                    other => errors.push(other),
                }
            }
            match errors.len() {
                0 => Ok(()),
                1 => Err(errors.remove(0)),
                _ => Err(Error::Multiple(errors)),
            }
        }
    }
}
