//! Convenience composition of the aggregation components.
//!
//! Pure assembly: callers that want a single call per dashboard panel
//! use these; callers that need only one component call it directly.

use crate::aggregator::span_tree::build_span_forest;
use crate::aggregator::timeline::{project_timeline, Timeline};
use crate::aggregator::usage_buckets::{bucket_usage, usage_axis, BucketInterval, LabelSeries};
use crate::parser::metrics_text::parse_metrics_text;
use crate::parser::schema::{SpanNode, Trace, UsagePoint};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the trace panel needs for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceView {
    pub request_id: String,

    /// Call trees reconstructed from the trace's spans
    pub roots: Vec<SpanNode>,

    /// Timeline projection; `None` when the trace carried no spans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
}

impl TraceView {
    /// Build the per-trace view from a fetched trace
    pub fn from_trace(trace: &Trace) -> Self {
        Self {
            request_id: trace.request_id.clone(),
            roots: build_span_forest(&trace.spans),
            timeline: project_timeline(&trace.spans),
        }
    }
}

/// Axis plus per-label series for one usage chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageChart {
    /// Shared x-axis including the trailing look-ahead slot
    pub axis: Vec<NaiveDateTime>,

    /// One dataset per label, first-seen order
    pub series: Vec<LabelSeries>,
}

impl UsageChart {
    /// Bucket raw usage points into a renderable chart
    pub fn from_points(points: &[UsagePoint], interval: BucketInterval) -> Self {
        Self {
            axis: usage_axis(points, interval),
            series: bucket_usage(points, interval),
        }
    }
}

/// Aggregate exposition text into named counters.
///
/// Pass-through to [`parse_metrics_text`], kept here so the facade
/// covers all four dashboard panels.
pub fn metrics_overview(text: &str) -> HashMap<String, f64> {
    parse_metrics_text(text)
}
