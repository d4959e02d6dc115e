//! Parser for the gateway's metrics exposition text format.
//!
//! The gateway publishes Prometheus-style lines:
//!
//! ```text
//! # HELP llm_requests_total Total requests routed
//! llm_requests_total{provider="openai",model="gpt-4"} 42
//! ```
//!
//! The format is externally defined and may carry metadata lines this
//! engine does not need, so parsing is strictly best-effort: lines that
//! do not match `<name>[{<labels>}] <number>` are dropped, never raised
//! as errors.

use log::debug;
use std::collections::HashMap;

/// Aggregate exposition text into one counter per base metric name.
///
/// The metric name is everything before the first `{`; values from all
/// label combinations sharing a name are summed into a single entry.
/// Comments, blank lines and unparseable lines are skipped. Never fails;
/// iteration order of the result is unspecified.
pub fn parse_metrics_text(text: &str) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        match parse_data_line(line) {
            LineKind::Sample { name, value, .. } => {
                *totals.entry(name.to_string()).or_insert(0.0) += value;
            }
            LineKind::Ignored => {}
            LineKind::Unparseable => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} unparseable metric lines", skipped);
    }

    totals
}

/// One data line with its label set preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLine {
    pub name: String,
    pub labels: HashMap<String, String>,
    pub value: f64,
}

/// Parse exposition text keeping per-line label sets.
///
/// Same skip-on-mismatch policy as [`parse_metrics_text`]; used by the
/// `metrics --group-by` view to break a counter down by a label key.
pub fn parse_metrics_lines(text: &str) -> Vec<MetricLine> {
    text.lines()
        .filter_map(|line| match parse_data_line(line) {
            LineKind::Sample {
                name,
                labels,
                value,
            } => Some(MetricLine {
                name: name.to_string(),
                labels: parse_labels(labels.unwrap_or("")),
                value,
            }),
            _ => None,
        })
        .collect()
}

/// Sum one metric's values grouped by a label key.
///
/// Lines of other metrics are ignored; lines of the target metric that
/// lack the label key fall into an `"unknown"` group. `group_by = "all"`
/// collapses everything into a single `"all"` entry.
pub fn group_metric(
    lines: &[MetricLine],
    metric_name: &str,
    group_by: &str,
) -> HashMap<String, f64> {
    let mut grouped: HashMap<String, f64> = HashMap::new();

    for line in lines.iter().filter(|l| l.name == metric_name) {
        let key = match group_by {
            "all" => "all".to_string(),
            label_key => line
                .labels
                .get(label_key)
                .cloned()
                .unwrap_or_else(|| "unknown".to_string()),
        };
        *grouped.entry(key).or_insert(0.0) += line.value;
    }

    grouped
}

/// Classification of a single exposition line
enum LineKind<'a> {
    /// A well-formed sample: stripped name, raw label body, numeric value
    Sample {
        name: &'a str,
        labels: Option<&'a str>,
        value: f64,
    },
    /// Comment or blank line
    Ignored,
    /// Anything else; dropped without error
    Unparseable,
}

/// Classify one line of exposition text
fn parse_data_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return LineKind::Ignored;
    }

    if let Some(brace) = trimmed.find('{') {
        let name = &trimmed[..brace];
        if name.is_empty() {
            return LineKind::Unparseable;
        }

        // Labels run to the last '}' on the line; the value follows.
        let Some(end) = trimmed.rfind('}') else {
            return LineKind::Unparseable;
        };
        if end < brace {
            return LineKind::Unparseable;
        }

        let labels = &trimmed[brace + 1..end];
        match trimmed[end + 1..].trim().parse::<f64>() {
            Ok(value) => LineKind::Sample {
                name,
                labels: Some(labels),
                value,
            },
            Err(_) => LineKind::Unparseable,
        }
    } else {
        // Unlabelled sample: "<name> <number>"
        let mut parts = trimmed.split_whitespace();
        let (Some(name), Some(value_str)) = (parts.next(), parts.next()) else {
            return LineKind::Unparseable;
        };
        match value_str.parse::<f64>() {
            Ok(value) => LineKind::Sample {
                name,
                labels: None,
                value,
            },
            Err(_) => LineKind::Unparseable,
        }
    }
}

/// Parse a label body like `provider="openai",model="gpt-4"` into a map.
///
/// Values keep their surrounding quotes stripped; malformed segments
/// (no `=`) are dropped.
fn parse_labels(labels_str: &str) -> HashMap<String, String> {
    let mut labels = HashMap::new();

    for part in labels_str.split(',') {
        let part = part.trim();
        if let Some(eq) = part.find('=') {
            let key = part[..eq].trim().to_string();
            let value = part[eq + 1..].trim().trim_matches('"').to_string();
            if !key.is_empty() {
                labels.insert(key, value);
            }
        }
    }

    labels
}
