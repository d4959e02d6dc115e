//! End-to-end checks of the aggregation engine through the public API.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use gateway_dash::aggregator::{
    build_span_forest, project_timeline, BucketInterval, TraceView, UsageChart,
};
use gateway_dash::parser::schema::{Span, SpanNode, Trace, UsagePoint};
use gateway_dash::parser::parse_metrics_text;
use pretty_assertions::assert_eq;

fn span(id: &str, parent: Option<&str>, start_ms: i64) -> Span {
    Span {
        span_id: id.to_string(),
        parent_id: parent.map(str::to_string),
        request_id: "req-1".to_string(),
        name: format!("op_{}", id),
        kind: "internal".to_string(),
        status: "ok".to_string(),
        start_time: DateTime::<Utc>::from_timestamp_millis(1_758_000_000_000 + start_ms)
            .expect("valid timestamp"),
        duration_ms: 10,
    }
}

fn forest_size(forest: &[SpanNode]) -> usize {
    forest.iter().map(SpanNode::node_count).sum()
}

fn local(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 19)
        .expect("valid date")
        .and_hms_opt(h, m, 0)
        .expect("valid time")
}

#[test]
fn forest_conserves_spans_under_malformed_parents() {
    let spans = vec![
        span("a", None, 0),
        span("b", Some("a"), 1),
        span("dup", None, 2),
        span("dup", Some("missing"), 3),
        span("self", Some("self"), 4),
        span("x", Some("y"), 5),
        span("y", Some("x"), 6),
    ];

    let forest = build_span_forest(&spans);
    assert_eq!(forest_size(&forest), spans.len());
}

#[test]
fn worked_example_two_roots_and_offsets() {
    // Spans: a (root, T0), b (child of a, T0+40ms), c (parent unknown, T0+90ms)
    let spans = vec![
        span("a", None, 0),
        span("b", Some("a"), 40),
        span("c", Some("zzz"), 90),
    ];

    let forest = build_span_forest(&spans);
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].span_id, "a");
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].span_id, "b");
    assert_eq!(forest[1].span_id, "c");

    let timeline = project_timeline(&spans).expect("non-empty input");
    assert_eq!(timeline.entries[0].offset_ms, 0);
    assert_eq!(timeline.entries[1].offset_ms, 40);
    assert_eq!(timeline.entries[2].offset_ms, 90);
}

#[test]
fn well_formed_forest_root_count_matches_parentless_spans() {
    let spans = vec![
        span("r1", None, 0),
        span("r1a", Some("r1"), 1),
        span("r1b", Some("r1"), 2),
        span("r2", None, 3),
        span("r2a", Some("r2"), 4),
        span("r2a1", Some("r2a"), 5),
    ];

    let forest = build_span_forest(&spans);
    assert_eq!(forest.len(), 2);
    assert_eq!(forest_size(&forest), 6);
}

#[test]
fn empty_inputs_yield_empty_outputs() {
    assert!(build_span_forest(&[]).is_empty());
    assert!(project_timeline(&[]).is_none());
    assert!(parse_metrics_text("").is_empty());
    assert!(parse_metrics_text("# comment\n").is_empty());

    let chart = UsageChart::from_points(&[], BucketInterval::Hour);
    assert!(chart.axis.is_empty());
    assert!(chart.series.is_empty());
}

#[test]
fn metrics_collapse_label_sets_and_stay_idempotent() {
    let text = "foo{a=\"1\"} 3\nfoo{a=\"2\"} 4\n";

    let first = parse_metrics_text(text);
    assert_eq!(first.len(), 1);
    assert_eq!(first["foo"], 7.0);

    let second = parse_metrics_text(text);
    assert_eq!(first, second);
}

#[test]
fn metrics_skip_what_they_cannot_parse() {
    let text = concat!(
        "# TYPE llm_requests_total counter\n",
        "llm_requests_total{provider=\"openai\"} 12\n",
        "llm_requests_total{provider=\"anthropic\"} 8\n",
        "some malformed noise here\n",
        "\n",
        "llm_tokens_total 500\n",
    );

    let totals = parse_metrics_text(text);
    assert_eq!(totals.len(), 2);
    assert_eq!(totals["llm_requests_total"], 20.0);
    assert_eq!(totals["llm_tokens_total"], 500.0);
}

#[test]
fn usage_buckets_sum_and_axis_trails_one_interval() {
    let points = vec![
        UsagePoint {
            label: "k1".to_string(),
            timestamp: local(13, 5),
            value: 10.0,
        },
        UsagePoint {
            label: "k1".to_string(),
            timestamp: local(13, 40),
            value: 5.0,
        },
    ];

    let chart = UsageChart::from_points(&points, BucketInterval::Hour);

    assert_eq!(chart.axis, vec![local(13, 0), local(14, 0)]);
    assert_eq!(chart.series.len(), 1);
    assert_eq!(chart.series[0].buckets.len(), 1);
    assert_eq!(chart.series[0].buckets[0].value, 15.0);
    assert_eq!(chart.series[0].buckets[0].key(), "2026-01-19T13:00");
}

#[test]
fn trace_view_composes_all_trace_panels() {
    let trace = Trace {
        request_id: "req-1".to_string(),
        model: "gpt-4".to_string(),
        provider: "openai".to_string(),
        status: "ok".to_string(),
        duration_ms: 100,
        input_tokens: 12,
        output_tokens: 34,
        total_tokens: 46,
        spans: vec![span("a", None, 0), span("b", Some("a"), 40)],
    };

    let view = TraceView::from_trace(&trace);
    assert_eq!(view.roots.len(), 1);
    assert!(view.roots[0].has_children);

    let timeline = view.timeline.expect("trace has spans");
    assert_eq!(timeline.entries.len(), 2);
    assert_eq!(timeline.entries[0].offset_ms, 0);
}

#[test]
fn trace_wire_format_round_trips() {
    let json = r#"{
        "request_id": "req-7",
        "model": "claude-sonnet",
        "provider": "anthropic",
        "status": "ok",
        "duration_ms": 230,
        "total_tokens": 512,
        "spans": [
            {
                "span_id": "s1",
                "request_id": "req-7",
                "name": "messages",
                "kind": "server",
                "status": "ok",
                "start_time": "2026-01-19T13:05:00Z",
                "duration_ms": 230
            },
            {
                "span_id": "s2",
                "parent_id": "s1",
                "request_id": "req-7",
                "name": "provider_call",
                "kind": "client",
                "status": "error",
                "start_time": "2026-01-19T13:05:00.050Z",
                "duration_ms": 180
            }
        ]
    }"#;

    let trace: Trace = serde_json::from_str(json).expect("valid trace JSON");
    assert_eq!(trace.spans.len(), 2);
    assert_eq!(trace.input_tokens, 0);

    let view = TraceView::from_trace(&trace);
    assert_eq!(view.roots.len(), 1);
    assert_eq!(view.roots[0].children[0].name, "provider_call");

    let timeline = view.timeline.expect("trace has spans");
    assert_eq!(timeline.entries[1].offset_ms, 50);
}
