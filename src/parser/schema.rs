//! Wire and report schema definitions.
//!
//! Wire types mirror what the gateway's dashboard API returns;
//! report types define the JSON files we write to disk.
//! Report schema is versioned to allow future evolution.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One traced operation within a gateway request.
///
/// Spans are immutable inputs: fetched per trace query,
/// never mutated after ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// Unique span identifier within a trace
    pub span_id: String,

    /// Parent span ID (None for root spans)
    #[serde(default)]
    pub parent_id: Option<String>,

    /// Request-level identifier shared by all spans of one trace
    pub request_id: String,

    /// Operation name (e.g. "chat_completions", "load_balancer::select")
    pub name: String,

    /// Span kind: server/client/internal. Open string, not a closed enum;
    /// the gateway may introduce new kinds without breaking us.
    #[serde(default)]
    pub kind: String,

    /// Span status: "ok" or an error marker. Open string.
    #[serde(default)]
    pub status: String,

    /// Absolute start timestamp
    pub start_time: DateTime<Utc>,

    /// Duration in milliseconds
    #[serde(default)]
    pub duration_ms: u64,
}

/// A complete trace: request-level metadata plus its spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub request_id: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub provider: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub duration_ms: u64,

    #[serde(default)]
    pub input_tokens: u64,

    #[serde(default)]
    pub output_tokens: u64,

    #[serde(default)]
    pub total_tokens: u64,

    #[serde(default)]
    pub spans: Vec<Span>,
}

/// A span plus its resolved children (insertion order).
///
/// Built fresh per call by the span tree builder; exclusively
/// owned by the caller, never shared or mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanNode {
    pub span_id: String,
    pub parent_id: Option<String>,
    pub request_id: String,
    pub name: String,
    pub kind: String,
    pub status: String,
    pub start_time: DateTime<Utc>,
    pub duration_ms: u64,

    /// Child spans in input order
    pub children: Vec<SpanNode>,

    /// Derived flag, true once at least one child was attached
    pub has_children: bool,
}

impl SpanNode {
    /// Wrap a span's data into a childless node
    pub fn from_span(span: &Span) -> Self {
        Self {
            span_id: span.span_id.clone(),
            parent_id: span.parent_id.clone(),
            request_id: span.request_id.clone(),
            name: span.name.clone(),
            kind: span.kind.clone(),
            status: span.status.clone(),
            start_time: span.start_time,
            duration_ms: span.duration_ms,
            children: Vec::new(),
            has_children: false,
        }
    }

    /// Count this node and all descendants
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SpanNode::node_count).sum::<usize>()
    }
}

/// A raw usage observation from the gateway's request log.
///
/// Timestamps arrive already expressed in the viewer's local
/// civil time, not UTC; the bucketer truncates them in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsagePoint {
    /// Grouping dimension, e.g. an API key name or provider/instance
    pub label: String,

    /// Local civil timestamp of the observation
    pub timestamp: NaiveDateTime,

    /// Numeric payload, e.g. token count or request count
    pub value: f64,
}

/// Trace report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Request that was inspected
    pub request_id: String,

    /// Root-level call trees reconstructed from the trace's spans
    pub roots: Vec<SpanNode>,

    /// Timeline projection (absent when the trace had no spans)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<crate::aggregator::timeline::Timeline>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Metrics report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub version: String,

    /// Aggregated counters, one entry per stripped metric name
    pub metrics: std::collections::HashMap<String, f64>,

    pub generated_at: String,
}

/// Usage report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageReport {
    pub version: String,

    /// Chart axis plus per-label bucket series
    pub chart: crate::aggregator::facade::UsageChart,

    pub generated_at: String,
}
