//! Bucket raw usage observations into fixed time intervals.
//!
//! The gateway's request log yields (label, timestamp, value) points,
//! timestamped in the viewer's local civil time. This module truncates
//! each timestamp to the configured interval, sums values per
//! (label, bucket), and builds a shared chart axis.
//!
//! Two contract quirks to keep in mind:
//! - The axis always carries one synthetic slot one interval after the
//!   latest observed bucket, so charts never end flush at "now".
//! - Missing (label, bucket) pairs are not filled in; the rendering
//!   layer treats absence as zero.

use crate::parser::schema::UsagePoint;
use crate::utils::config::BUCKET_KEY_FORMAT;
use chrono::{Duration, NaiveDateTime, Timelike};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Fixed bucket width for usage aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketInterval {
    Minute,
    Hour,
    Day,
}

impl BucketInterval {
    /// Truncate a timestamp to this interval's boundary
    pub fn truncate(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let truncated = match self {
            BucketInterval::Minute => ts.date().and_hms_opt(ts.hour(), ts.minute(), 0),
            BucketInterval::Hour => ts.date().and_hms_opt(ts.hour(), 0, 0),
            BucketInterval::Day => ts.date().and_hms_opt(0, 0, 0),
        };
        // hour/minute come from a valid timestamp, so this never misses
        truncated.unwrap_or(ts)
    }

    /// Width of one bucket
    pub fn step(&self) -> Duration {
        match self {
            BucketInterval::Minute => Duration::minutes(1),
            BucketInterval::Hour => Duration::hours(1),
            BucketInterval::Day => Duration::days(1),
        }
    }
}

impl std::fmt::Display for BucketInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketInterval::Minute => write!(f, "minute"),
            BucketInterval::Hour => write!(f, "hour"),
            BucketInterval::Day => write!(f, "day"),
        }
    }
}

/// Aggregated value for one (label, bucket) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucket {
    pub label: String,

    /// Bucket start, truncated local timestamp
    pub bucket_start: NaiveDateTime,

    /// Sum of all observations that fell into this bucket
    pub value: f64,
}

impl TimeBucket {
    /// Canonical minute-granularity display key (`YYYY-MM-DDTHH:MM`)
    pub fn key(&self) -> String {
        self.bucket_start.format(BUCKET_KEY_FORMAT).to_string()
    }
}

/// One label's buckets, sorted by bucket start ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSeries {
    pub label: String,
    pub buckets: Vec<TimeBucket>,
}

/// Group usage points into per-label bucket series.
///
/// Labels iterate in first-seen order (stable color assignment
/// downstream); multiple observations in the same (label, bucket) are
/// summed, never overwritten. Only observed pairs are produced.
pub fn bucket_usage(points: &[UsagePoint], interval: BucketInterval) -> Vec<LabelSeries> {
    debug!(
        "Bucketing {} usage points at {} granularity",
        points.len(),
        interval
    );

    let mut label_order: Vec<String> = Vec::new();
    let mut by_label: HashMap<String, BTreeMap<NaiveDateTime, f64>> = HashMap::new();

    for point in points {
        let bucket_start = interval.truncate(point.timestamp);
        let buckets = by_label.entry(point.label.clone()).or_insert_with(|| {
            label_order.push(point.label.clone());
            BTreeMap::new()
        });
        *buckets.entry(bucket_start).or_insert(0.0) += point.value;
    }

    label_order
        .into_iter()
        .filter_map(|label| {
            let buckets = by_label.remove(&label)?;
            let buckets = buckets
                .into_iter()
                .map(|(bucket_start, value)| TimeBucket {
                    label: label.clone(),
                    bucket_start,
                    value,
                })
                .collect();
            Some(LabelSeries { label, buckets })
        })
        .collect()
}

/// Build the shared chart axis for a set of usage points.
///
/// The axis is the sorted union of distinct bucket starts across all
/// labels, plus exactly one trailing slot one interval after the latest
/// observed bucket. Empty input yields an empty axis with no trailing
/// slot.
pub fn usage_axis(points: &[UsagePoint], interval: BucketInterval) -> Vec<NaiveDateTime> {
    let distinct: BTreeSet<NaiveDateTime> = points
        .iter()
        .map(|point| interval.truncate(point.timestamp))
        .collect();

    let mut axis: Vec<NaiveDateTime> = distinct.into_iter().collect();

    if let Some(&latest) = axis.last() {
        if let Some(next) = latest.checked_add_signed(interval.step()) {
            axis.push(next);
        }
    }

    axis
}
