//! Plain-text renderers for terminal output.
//!
//! The engine hands over finished structures; everything here is
//! formatting. Missing (label, bucket) pairs render as zero, and
//! negative timeline offsets clip to the left edge, per the
//! aggregation contracts.

use crate::aggregator::facade::UsageChart;
use crate::aggregator::timeline::{SpanSeverity, Timeline};
use crate::parser::schema::SpanNode;
use crate::utils::config::TIMELINE_BAR_WIDTH;
use std::collections::HashMap;
use std::fmt::Write;

/// Render a span forest as an indented tree
pub fn render_span_tree(roots: &[SpanNode]) -> String {
    let mut out = String::new();
    for root in roots {
        render_node(root, 0, &mut out);
    }
    out
}

fn render_node(node: &SpanNode, depth: usize, out: &mut String) {
    let marker = match SpanSeverity::from_status(&node.status) {
        SpanSeverity::Success => ' ',
        SpanSeverity::Failure => '!',
    };
    let _ = writeln!(
        out,
        "{}{}{} [{}] {} ms ({})",
        "  ".repeat(depth),
        marker,
        node.name,
        node.kind,
        node.duration_ms,
        node.status,
    );
    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

/// Render a timeline as horizontal bars scaled to a fixed width
pub fn render_timeline(timeline: &Timeline) -> String {
    let extent = timeline
        .entries
        .iter()
        .map(|e| e.offset_ms.max(0) as u64 + e.duration_ms)
        .max()
        .unwrap_or(0)
        .max(1);

    let name_width = timeline
        .entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in &timeline.entries {
        // Negative offsets (non-monotonic clocks) clip to zero
        let offset = entry.offset_ms.max(0) as u64;
        let lead = (offset * TIMELINE_BAR_WIDTH as u64 / extent) as usize;
        let bar = ((entry.duration_ms * TIMELINE_BAR_WIDTH as u64 / extent) as usize).max(1);

        let glyph = match SpanSeverity::from_status(&entry.status) {
            SpanSeverity::Success => '=',
            SpanSeverity::Failure => 'x',
        };
        let _ = writeln!(
            out,
            "{:<name_width$} |{}{}{} +{} ms / {} ms",
            entry.name,
            " ".repeat(lead),
            glyph.to_string().repeat(bar),
            " ".repeat(TIMELINE_BAR_WIDTH.saturating_sub(lead + bar)),
            entry.offset_ms,
            entry.duration_ms,
        );
    }
    out
}

/// Render aggregated counters as a name-sorted table
pub fn render_metrics_table(metrics: &HashMap<String, f64>) -> String {
    let mut names: Vec<&String> = metrics.keys().collect();
    names.sort();

    let name_width = names.iter().map(|n| n.len()).max().unwrap_or(0);

    let mut out = String::new();
    for name in names {
        let _ = writeln!(out, "{:<name_width$}  {}", name, metrics[name]);
    }
    out
}

/// Render a usage chart as an axis-by-label table.
///
/// Labels lacking a bucket at an axis slot show 0; the trailing
/// look-ahead slot therefore renders as an all-zero row.
pub fn render_usage_table(chart: &UsageChart) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<17}", "bucket");
    for series in &chart.series {
        let _ = write!(out, " {:>12}", series.label);
    }
    let _ = writeln!(out);

    for slot in &chart.axis {
        let _ = write!(out, "{:<17}", slot.format("%Y-%m-%dT%H:%M"));
        for series in &chart.series {
            let value = series
                .buckets
                .iter()
                .find(|b| b.bucket_start == *slot)
                .map(|b| b.value)
                .unwrap_or(0.0);
            let _ = write!(out, " {:>12}", value);
        }
        let _ = writeln!(out);
    }

    out
}
