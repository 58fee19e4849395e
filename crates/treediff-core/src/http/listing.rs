//! Response body decoding for the contents and blobs endpoints

use crate::error::{Error, Result};
use crate::types::TreeEntry;
use base64::Engine;
use serde::Deserialize;

/// Shape of a contents response
///
/// The endpoint answers with an array for a directory and with a bare object
/// when the path names a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Directory children
    Directory(Vec<TreeEntry>),
    /// The path itself is a file
    Single(TreeEntry),
}

impl Listing {
    /// Flatten into entries; a single file becomes a one-element listing
    pub fn into_entries(self) -> Vec<TreeEntry> {
        match self {
            Listing::Directory(entries) => entries,
            Listing::Single(entry) => vec![entry],
        }
    }
}

/// Decode a contents body: list shape first, then single-object shape.
///
/// Only a failure of both shapes is an error, and it carries both causes.
pub fn decode_listing(body: &[u8], path: &str) -> Result<Listing> {
    match serde_json::from_slice::<Vec<TreeEntry>>(body) {
        Ok(entries) => Ok(Listing::Directory(entries)),
        Err(list_err) => {
            log::debug!("{} is not a list ({}), trying single entry", path, list_err);
            serde_json::from_slice::<TreeEntry>(body)
                .map(Listing::Single)
                .map_err(|single_err| {
                    Error::Decode(format!(
                        "{}: not a listing ({}) nor a single entry ({})",
                        path, list_err, single_err
                    ))
                })
        }
    }
}

/// Blob endpoint payload
#[derive(Debug, Deserialize)]
struct BlobResponse {
    content: String,
    encoding: String,
}

/// Decode a blob body to text
///
/// GitHub wraps base64 content at 60 columns, so embedded whitespace is
/// stripped before decoding. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_blob(body: &[u8], sha: &str) -> Result<String> {
    let blob: BlobResponse = serde_json::from_slice(body)
        .map_err(|e| Error::Decode(format!("blob {}: {}", sha, e)))?;

    if blob.encoding != "base64" {
        return Err(Error::Decode(format!(
            "blob {}: unsupported encoding '{}'",
            sha, blob.encoding
        )));
    }

    let compact: String = blob
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| Error::Decode(format!("blob {}: {}", sha, e)))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
