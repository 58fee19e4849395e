//! Index-by-index line comparison

use super::{normalized_lines, DiffStrategy};
use crate::types::DiffLine;

/// Compares line `i` of one side with line `i` of the other
///
/// An inserted or deleted line shifts every later index, so the remainder
/// of the file shows up as changed. Blank lines never produce a record.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalDiff;

impl DiffStrategy for PositionalDiff {
    fn diff(&self, local: &str, remote: &str) -> Vec<DiffLine> {
        let local = normalized_lines(local);
        let remote = normalized_lines(remote);
        let max_len = local.len().max(remote.len());

        let mut records = Vec::new();
        for i in 0..max_len {
            let l = local.get(i).copied().unwrap_or("");
            let r = remote.get(i).copied().unwrap_or("");
            if l == r {
                continue;
            }
            if !l.is_empty() {
                records.push(DiffLine::removed(l));
            }
            if !r.is_empty() {
                records.push(DiffLine::added(r));
            }
        }
        records
    }
}
