//! Reporting of per-file outcomes

pub mod render;
pub mod reporter;

pub use render::{differences_header, render_markdown_diff};
pub use reporter::{
    CollectingReporter, ConsoleReporter, JsonReporter, ReportEvent, Reporter, SkipReason,
};
