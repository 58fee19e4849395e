//! Substring ignore filter applied to discovered paths

/// Ignore rules from the repository descriptor
///
/// A path is ignored when any rule is a substring of it. Rules are not
/// globs: `"test"` drops `src/test/`, `tests/x.rs` and `latest.md` alike.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    rules: Vec<String>,
}

impl IgnoreFilter {
    /// Create a filter from descriptor rules; empty rules are dropped
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(Into::into)
                .filter(|r: &String| !r.is_empty())
                .collect(),
        }
    }

    /// True when `path` must be skipped together with its subtree
    #[inline]
    pub fn is_ignored(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| path.contains(rule.as_str()))
    }

    /// The rule that matched, for logging
    pub fn matching_rule(&self, path: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| path.contains(rule.as_str()))
            .map(String::as_str)
    }

    /// Number of active rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// No rules configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
