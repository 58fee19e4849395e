//! Result sinks for fetched and compared files

use crate::output::render::{differences_header, render_markdown_diff};
use crate::types::{ComparisonResult, RunOptions};
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Why a discovered entry produced no leaf work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Matched an ignore rule
    Ignored,
    /// Compare mode and the file does not exist locally
    MissingLocal,
    /// Symlink, submodule or unknown entry kind
    UnsupportedKind,
}

/// Receives per-file outcomes as they happen
///
/// Calls arrive concurrently and in no particular order.
pub trait Reporter: Send + Sync {
    /// A file was downloaded and written in sync mode
    fn fetched(&self, remote_path: &str, local_path: &Path);

    /// A file was compared
    fn compared(&self, result: &ComparisonResult);

    /// A path was skipped
    fn skipped(&self, _remote_path: &str, _reason: SkipReason) {}
}

/// Human-readable output
///
/// Sync mode prints `Fetched file: <path>`. Compare mode prints one
/// `<n> Differences for: <path>` line per differing file and, when verbose,
/// the diff as a fenced block. Matching files print nothing.
pub struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
    verbose: bool,
    color: bool,
}

impl ConsoleReporter<std::io::Stdout> {
    /// Reporter writing to stdout
    pub fn stdout(verbose: bool, color: bool) -> Self {
        Self::new(std::io::stdout(), verbose, color)
    }

    /// Stdout reporter whose verbosity follows the run options
    pub fn from_options(options: &RunOptions, color: bool) -> Self {
        Self::stdout(options.verbose, color)
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    /// Reporter writing to `out`
    pub fn new(out: W, verbose: bool, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            verbose,
            color,
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn emit(&self, text: &str) {
        // One lock per event keeps a header and its block together
        let mut out = self.out.lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            log::warn!("failed to write report: {}", e);
        }
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn fetched(&self, remote_path: &str, _local_path: &Path) {
        self.emit(&format!("Fetched file: {}\n", remote_path));
    }

    fn compared(&self, result: &ComparisonResult) {
        if result.matched {
            log::debug!("no differences for {}", result.local_path.display());
            return;
        }

        let mut text = differences_header(result.total_diffs, &result.local_path.display().to_string());
        text.push('\n');
        if self.verbose {
            if let Some(records) = &result.diff {
                text.push_str(&render_markdown_diff(records, self.color));
            }
        }
        self.emit(&text);
    }

    fn skipped(&self, remote_path: &str, reason: SkipReason) {
        log::debug!("skipped {} ({:?})", remote_path, reason);
    }
}

/// Newline-delimited JSON output, one object per event
pub struct JsonReporter<W: Write + Send> {
    out: Mutex<W>,
}

impl JsonReporter<std::io::Stdout> {
    /// Reporter writing to stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonReporter<W> {
    /// Reporter writing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn emit(&self, value: serde_json::Value) {
        let mut out = self.out.lock();
        let written = serde_json::to_writer(&mut *out, &value)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(out));
        if let Err(e) = written {
            log::warn!("failed to write report: {}", e);
        }
    }
}

impl<W: Write + Send> Reporter for JsonReporter<W> {
    fn fetched(&self, remote_path: &str, local_path: &Path) {
        self.emit(serde_json::json!({
            "event": "fetched",
            "path": remote_path,
            "local_path": local_path.display().to_string(),
        }));
    }

    fn compared(&self, result: &ComparisonResult) {
        let diff: Option<Vec<String>> = result
            .diff
            .as_ref()
            .map(|records| records.iter().map(|r| r.to_string()).collect());
        self.emit(serde_json::json!({
            "event": "compared",
            "path": result.remote_path,
            "local_path": result.local_path.display().to_string(),
            "remote_hash": result.remote_hash.as_str(),
            "local_hash": result.local_hash.as_str(),
            "matched": result.matched,
            "total_diffs": result.total_diffs,
            "diff": diff,
        }));
    }
}

/// Event recorded by [`CollectingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// See [`Reporter::fetched`]
    Fetched {
        /// Remote path
        remote_path: String,
        /// Written local path
        local_path: PathBuf,
    },
    /// See [`Reporter::compared`]
    Compared(ComparisonResult),
    /// See [`Reporter::skipped`]
    Skipped {
        /// Remote path
        remote_path: String,
        /// Reason
        reason: SkipReason,
    },
}

/// Keeps every event in memory, for embedding and tests
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl CollectingReporter {
    /// Empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of events so far, in arrival order
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().clone()
    }

    /// Only comparison results
    pub fn comparisons(&self) -> Vec<ComparisonResult> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Compared(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    /// Remote paths of fetched files, sorted
    pub fn fetched_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Fetched { remote_path, .. } => Some(remote_path.clone()),
                _ => None,
            })
            .collect();
        paths.sort();
        paths
    }
}

impl Reporter for CollectingReporter {
    fn fetched(&self, remote_path: &str, local_path: &Path) {
        self.events.lock().push(ReportEvent::Fetched {
            remote_path: remote_path.to_string(),
            local_path: local_path.to_path_buf(),
        });
    }

    fn compared(&self, result: &ComparisonResult) {
        self.events.lock().push(ReportEvent::Compared(result.clone()));
    }

    fn skipped(&self, remote_path: &str, reason: SkipReason) {
        self.events.lock().push(ReportEvent::Skipped {
            remote_path: remote_path.to_string(),
            reason,
        });
    }
}
