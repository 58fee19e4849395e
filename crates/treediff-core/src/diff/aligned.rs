//! Longest-common-subsequence line alignment

use super::{normalized_lines, DiffStrategy};
use crate::types::DiffLine;

/// Minimal line diff: lines outside the LCS are removed or added
///
/// Uses the same normalisation as [`super::PositionalDiff`], including
/// dropping blank lines from the output. Quadratic in memory, intended for
/// source-sized files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignedDiff;

impl DiffStrategy for AlignedDiff {
    fn diff(&self, local: &str, remote: &str) -> Vec<DiffLine> {
        let a = normalized_lines(local);
        let b = normalized_lines(remote);
        let (n, m) = (a.len(), b.len());

        // lcs[i][j] = LCS length of a[i..] and b[j..]
        let mut lcs = vec![vec![0u32; m + 1]; n + 1];
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                lcs[i][j] = if a[i] == b[j] {
                    lcs[i + 1][j + 1] + 1
                } else {
                    lcs[i + 1][j].max(lcs[i][j + 1])
                };
            }
        }

        let mut records = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < n && j < m {
            if a[i] == b[j] {
                i += 1;
                j += 1;
            } else if lcs[i + 1][j] >= lcs[i][j + 1] {
                push_removed(&mut records, a[i]);
                i += 1;
            } else {
                push_added(&mut records, b[j]);
                j += 1;
            }
        }
        for line in &a[i..] {
            push_removed(&mut records, line);
        }
        for line in &b[j..] {
            push_added(&mut records, line);
        }
        records
    }
}

fn push_removed(records: &mut Vec<DiffLine>, line: &str) {
    if !line.is_empty() {
        records.push(DiffLine::removed(line));
    }
}

fn push_added(records: &mut Vec<DiffLine>, line: &str) {
    if !line.is_empty() {
        records.push(DiffLine::added(line));
    }
}
