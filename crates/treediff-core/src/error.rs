//! Error types for treediff-core

use std::path::PathBuf;

/// Result type alias for treediff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for treediff operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Remote answered with a non-success status
    #[error("unexpected status code: {status} -> {target}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Path, hash or locator that was requested
        target: String,
    },

    /// API rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Response body did not match any expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Local object store lookup failed
    #[error("Git error: {0}")]
    Git(String),

    /// I/O error on a specific local path
    #[error("I/O error on {}: {source}", path.display())]
    LocalIo {
        /// Offending local path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Runtime error (task join, runtime construction)
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Failure while processing a remote path, with the cause attached
    #[error("failed to {action} {target}: {source}")]
    Fetch {
        /// What was being attempted ("fetch", "download", "compare")
        action: &'static str,
        /// Remote path of the root or file
        target: String,
        /// Underlying error
        source: Box<Error>,
    },

    /// Every error collected under the aggregate error policy
    #[error("{} errors: {}", .0.len(), join_messages(.0))]
    Multiple(Vec<Error>),
}

fn join_messages(errors: &[Error]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the URL, never headers, so the token cannot leak here
        Error::Http(err.to_string())
    }
}

impl From<git2::Error> for Error {
    fn from(err: git2::Error) -> Self {
        Error::Git(err.message().to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(format!("YAML error: {}", err))
    }
}

impl Error {
    /// Attach the remote path being processed to an error.
    pub fn context(self, action: &'static str, target: impl Into<String>) -> Self {
        Error::Fetch {
            action,
            target: target.into(),
            source: Box::new(self),
        }
    }

    /// Get the error kind, a Copy enum with no allocation.
    ///
    /// Context wrappers report the kind of the error they wrap.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Http(_) => ErrorKind::Http,
            Error::Status { .. } => ErrorKind::Status,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Git(_) => ErrorKind::Git,
            Error::LocalIo { .. } => ErrorKind::Io,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Fetch { source, .. } => source.kind(),
            Error::Multiple(_) => ErrorKind::Multiple,
        }
    }

    /// Innermost error, skipping context wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Fetch { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Fieldless error category for cheap pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// Transport error
    Http,
    /// Non-success HTTP status
    Status,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// Body decode failure
    Decode,
    /// Local object store error
    Git,
    /// Local I/O error
    Io,
    /// Runtime error
    Runtime,
    /// Aggregated errors
    Multiple,
}
