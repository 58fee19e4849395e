//! Line-level diffing of local and remote text

pub mod aligned;
pub mod positional;

pub use aligned::AlignedDiff;
pub use positional::PositionalDiff;

use crate::types::{DiffAlgorithm, DiffLine, LineTag};

/// A line diff algorithm
pub trait DiffStrategy: Send + Sync {
    /// Diff `local` against `remote`, returning removed/added records in order
    fn diff(&self, local: &str, remote: &str) -> Vec<DiffLine>;
}

/// Strategy for the configured algorithm
pub fn strategy_for(algorithm: DiffAlgorithm) -> &'static dyn DiffStrategy {
    match algorithm {
        DiffAlgorithm::Positional => &PositionalDiff,
        DiffAlgorithm::Aligned => &AlignedDiff,
    }
}

/// Split text the same way for every strategy: trim the whole text, split on
/// `\n`, trim each line. Empty text yields a single empty line.
pub fn normalized_lines(text: &str) -> Vec<&str> {
    text.trim().split('\n').map(str::trim).collect()
}

/// Number of removed plus added records
pub fn count_changes(records: &[DiffLine]) -> usize {
    records
        .iter()
        .filter(|r| matches!(r.tag, LineTag::Removed | LineTag::Added))
        .count()
}
