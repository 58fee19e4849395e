//! Git object model: blob hashing and local object lookup

pub mod hash;
pub mod objects;

pub use hash::{blob_digest, hash_local};
pub use objects::GitObjectStore;
