//! Wire schema and exposition-text parsing.
//!
//! This module handles:
//! - Span/Trace/UsagePoint wire types from the dashboard API
//! - Parsing the metrics exposition text format
//! - Versioned JSON report schemas

pub mod metrics_text;
pub mod schema;

// Re-export main types
pub use metrics_text::{group_metric, parse_metrics_lines, parse_metrics_text, MetricLine};
pub use schema::{MetricsReport, Span, SpanNode, Trace, TraceReport, UsagePoint, UsageReport};
