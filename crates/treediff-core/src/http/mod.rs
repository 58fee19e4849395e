//! HTTP client for the GitHub contents API

pub mod client;
pub mod listing;

pub use client::{require_token, GitHubContentsClient, DEFAULT_API_URL};
pub use listing::{decode_blob, decode_listing, Listing};
