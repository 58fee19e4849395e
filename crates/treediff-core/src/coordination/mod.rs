//! Traversal coordination: orchestration, recursion, limiting and leaf work

pub mod group;
pub mod limiter;
pub mod orchestrator;
pub mod pipeline;
pub mod walker;

pub use group::{fold_outcomes, join_children, join_tasks};
pub use limiter::{LeafLimiter, LeafPermit};
pub use orchestrator::Orchestrator;
pub use pipeline::{sync_file, CompareOutcome, Comparator};
pub use walker::TreeWalker;
