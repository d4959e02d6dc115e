//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components to perform user tasks.

pub mod metrics;
pub mod trace;
pub mod usage;

// Re-export main command functions
pub use metrics::{execute_metrics, MetricsArgs};
pub use trace::{execute_trace, TraceArgs};
pub use usage::{execute_usage, UsageArgs};
