//! Diff rendering as a fenced markdown block

use crate::types::{DiffLine, LineTag};
use colored::Colorize;

/// Render records as a ```` ```diff ```` fenced block
///
/// With `color` set, removed lines are red and added lines green; the fence
/// itself stays plain so the block is still valid markdown when piped.
pub fn render_markdown_diff(records: &[DiffLine], color: bool) -> String {
    let mut out = String::from("```diff\n");
    for record in records {
        let line = record.to_string();
        if color {
            let painted = match record.tag {
                LineTag::Removed => line.red(),
                LineTag::Added => line.green(),
            };
            out.push_str(&painted.to_string());
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
    out.push_str("```\n");
    out
}

/// Header line printed for every file with differences
pub fn differences_header(total_diffs: usize, path: &str) -> String {
    format!("{} Differences for: {}", total_diffs, path)
}
