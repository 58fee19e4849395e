//! Core type definitions

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Default bound on concurrently running leaf operations
pub const DEFAULT_MAX_PARALLEL: usize = 5;

/// Git object id rendered as 40 lowercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    /// Length of a hex-encoded SHA-1 id
    pub const HEX_LEN: usize = 40;

    /// Parse a hex id, normalising to lowercase
    pub fn parse(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        if hex.len() != Self::HEX_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Decode(format!("invalid object id '{}'", hex)));
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// Build from raw digest bytes
    pub fn from_digest(bytes: &[u8]) -> Self {
        use fmt::Write;
        let mut hex = String::with_capacity(bytes.len() * 2);
        for b in bytes {
            // Writing to a String cannot fail
            let _ = write!(hex, "{:02x}", b);
        }
        Self(hex)
    }

    /// Hex representation
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        ObjectId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Kind of a node in the remote tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file, handed to the leaf pipeline
    File,
    /// Directory, always expanded
    Dir,
    /// Symbolic link (skipped)
    Symlink,
    /// Git submodule (skipped)
    Submodule,
    /// Anything the API adds later (skipped)
    #[serde(other)]
    Unknown,
}

impl EntryKind {
    /// Get string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::Symlink => "symlink",
            Self::Submodule => "submodule",
            Self::Unknown => "unknown",
        }
    }
}

/// One node observed during traversal
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the repository root
    pub path: String,
    /// Node kind (`type` in the API)
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Remote object hash
    pub sha: ObjectId,
    /// Raw content locator, absent for directories and submodules
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Whether leaves are compared or downloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// One-way download of every file into the local root
    #[default]
    Sync,
    /// Hash-compare every file and diff the mismatches
    Compare,
}

/// How errors from concurrent children are surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Return the first error in dispatch order
    #[default]
    FirstError,
    /// Return every error as [`Error::Multiple`]
    Aggregate,
}

/// Selects the line diff algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffAlgorithm {
    /// Index-by-index comparison
    #[default]
    Positional,
    /// Longest-common-subsequence alignment
    Aligned,
}

impl std::str::FromStr for DiffAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "positional" => Ok(Self::Positional),
            "aligned" | "lcs" => Ok(Self::Aligned),
            other => Err(Error::Config(format!("unknown diff algorithm '{}'", other))),
        }
    }
}

/// Per-run options that are not part of the repository descriptor
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Compare or sync
    pub mode: Mode,
    /// Print full diffs instead of counts
    pub verbose: bool,
    /// Local directory that mirrors the repository root
    pub root_dir: PathBuf,
    /// Bound on concurrent leaf operations
    pub max_parallel: usize,
    /// Line diff algorithm
    pub diff_algorithm: DiffAlgorithm,
    /// Error surfacing policy
    pub error_policy: ErrorPolicy,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Sync,
            verbose: false,
            root_dir: PathBuf::from("."),
            max_parallel: DEFAULT_MAX_PARALLEL,
            diff_algorithm: DiffAlgorithm::Positional,
            error_policy: ErrorPolicy::FirstError,
        }
    }
}

/// Tag of a diff record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    /// Present locally, absent or different remotely
    Removed,
    /// Present remotely, absent or different locally
    Added,
}

impl LineTag {
    /// Prefix used when rendering
    pub const fn prefix(&self) -> char {
        match self {
            Self::Removed => '-',
            Self::Added => '+',
        }
    }
}

/// One signed line of a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Removed or added
    pub tag: LineTag,
    /// Trimmed line text
    pub text: String,
}

impl DiffLine {
    /// Removed record
    pub fn removed(text: impl Into<String>) -> Self {
        Self {
            tag: LineTag::Removed,
            text: text.into(),
        }
    }

    /// Added record
    pub fn added(text: impl Into<String>) -> Self {
        Self {
            tag: LineTag::Added,
            text: text.into(),
        }
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag.prefix(), self.text)
    }
}

/// Outcome of comparing one local file with its remote counterpart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    /// Local file that was hashed
    pub local_path: PathBuf,
    /// Remote path of the entry
    pub remote_path: String,
    /// Remote object hash
    pub remote_hash: ObjectId,
    /// Local object hash
    pub local_hash: ObjectId,
    /// Digests were equal
    pub matched: bool,
    /// Diff records, present only on mismatch
    pub diff: Option<Vec<DiffLine>>,
    /// Number of removed plus added records
    pub total_diffs: usize,
}
