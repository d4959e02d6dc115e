//! Aggregation of raw dashboard data into renderable structures.
//!
//! This module transforms already-fetched data into:
//! - Call tree forests (flat spans -> hierarchy)
//! - Timeline projections (relative offsets per span)
//! - Bucketed usage series (fixed intervals, shared axis)
//!
//! All components are pure and never fail; malformed input degrades to
//! documented fallbacks instead of errors.

pub mod facade;
pub mod span_tree;
pub mod timeline;
pub mod usage_buckets;

// Re-export main types and functions
pub use facade::{metrics_overview, TraceView, UsageChart};
pub use span_tree::build_span_forest;
pub use timeline::{project_timeline, SpanSeverity, Timeline, TimelineEntry};
pub use usage_buckets::{bucket_usage, usage_axis, BucketInterval, LabelSeries, TimeBucket};
