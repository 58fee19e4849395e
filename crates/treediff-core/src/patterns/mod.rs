//! Path filtering

pub mod matcher;

pub use matcher::IgnoreFilter;
