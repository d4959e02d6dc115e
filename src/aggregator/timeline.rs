//! Project spans onto a relative timeline for rendering.
//!
//! The earliest span start becomes the reference point; every span gets
//! an offset in milliseconds from it. Offsets can go negative when the
//! gateway's clocks are not monotonic across spans; that is valid output
//! and the rendering layer clips it.

use crate::parser::schema::Span;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One renderable timeline row per span, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub name: String,

    /// Milliseconds from the reference start; negative under
    /// non-monotonic clocks
    pub offset_ms: i64,

    pub duration_ms: u64,

    pub status: String,
}

/// Timeline projection of one trace's spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Earliest span start across the input
    pub reference_start: DateTime<Utc>,

    /// One entry per span, preserving input order
    pub entries: Vec<TimelineEntry>,
}

/// Binary severity used for timeline styling.
///
/// Exactly two states: `"ok"` maps to success, anything else to failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanSeverity {
    Success,
    Failure,
}

impl SpanSeverity {
    /// Classify a span status string
    pub fn from_status(status: &str) -> Self {
        if status == "ok" {
            SpanSeverity::Success
        } else {
            SpanSeverity::Failure
        }
    }
}

/// Project spans onto a relative timeline.
///
/// Returns `None` for an empty input; never fails otherwise.
pub fn project_timeline(spans: &[Span]) -> Option<Timeline> {
    let reference_start = spans.iter().map(|s| s.start_time).min()?;

    let entries = spans
        .iter()
        .map(|span| TimelineEntry {
            name: span.name.clone(),
            offset_ms: (span.start_time - reference_start).num_milliseconds(),
            duration_ms: span.duration_ms,
            status: span.status.clone(),
        })
        .collect();

    Some(Timeline {
        reference_start,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Span;

    fn span_at(name: &str, start_ms: i64, status: &str) -> Span {
        Span {
            span_id: name.to_string(),
            parent_id: None,
            request_id: "req-1".to_string(),
            name: name.to_string(),
            kind: "internal".to_string(),
            status: status.to_string(),
            start_time: DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000 + start_ms)
                .expect("valid timestamp"),
            duration_ms: 5,
        }
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(project_timeline(&[]).is_none());
    }

    #[test]
    fn test_minimal_start_gets_zero_offset() {
        let spans = vec![
            span_at("late", 250, "ok"),
            span_at("first", 0, "ok"),
            span_at("mid", 100, "ok"),
        ];
        let timeline = project_timeline(&spans).expect("non-empty input");

        assert_eq!(timeline.reference_start, spans[1].start_time);
        // Input order preserved, not sorted by offset
        assert_eq!(timeline.entries[0].name, "late");
        assert_eq!(timeline.entries[0].offset_ms, 250);
        assert_eq!(timeline.entries[1].offset_ms, 0);
        assert_eq!(timeline.entries[2].offset_ms, 100);
    }

    #[test]
    fn test_single_span_has_zero_offset() {
        let spans = vec![span_at("only", 42, "ok")];
        let timeline = project_timeline(&spans).expect("non-empty input");
        assert_eq!(timeline.entries[0].offset_ms, 0);
    }

    #[test]
    fn test_severity_is_binary() {
        assert_eq!(SpanSeverity::from_status("ok"), SpanSeverity::Success);
        assert_eq!(SpanSeverity::from_status("error"), SpanSeverity::Failure);
        assert_eq!(SpanSeverity::from_status("timeout"), SpanSeverity::Failure);
        assert_eq!(SpanSeverity::from_status(""), SpanSeverity::Failure);
        assert_eq!(SpanSeverity::from_status("OK"), SpanSeverity::Failure);
    }

    #[test]
    fn test_entries_carry_duration_and_status() {
        let spans = vec![span_at("a", 0, "error")];
        let timeline = project_timeline(&spans).expect("non-empty input");
        assert_eq!(timeline.entries[0].duration_ms, 5);
        assert_eq!(timeline.entries[0].status, "error");
    }
}
