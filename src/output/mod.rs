//! Output writers: JSON reports and terminal text rendering.

pub mod json;
pub mod text;

// Re-export main functions
pub use json::write_report;
pub use text::{render_metrics_table, render_span_tree, render_timeline, render_usage_table};
