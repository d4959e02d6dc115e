//! Usage command implementation.
//!
//! Fetches raw usage observations (or reads them from a JSON file),
//! buckets them at the requested interval, and prints the chart table.

use super::trace::validate_gateway_url;
use anyhow::{Context, Result};
use gateway_dash::aggregator::{BucketInterval, UsageChart};
use gateway_dash::api::DashboardClient;
use gateway_dash::output::{render_usage_table, write_report};
use gateway_dash::parser::schema::{UsagePoint, UsageReport};
use gateway_dash::utils::config::SCHEMA_VERSION;
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the usage command
#[derive(Debug, Clone)]
pub struct UsageArgs {
    /// Gateway base URL
    pub gateway_url: String,

    /// Read usage points from a JSON file instead of the gateway
    pub input_file: Option<PathBuf>,

    /// Bucket width: minute, hour or day
    pub interval: String,

    /// Optional JSON report path
    pub output_json: Option<PathBuf>,
}

/// Validate usage command arguments and resolve the interval
pub fn validate_args(args: &UsageArgs) -> Result<BucketInterval> {
    if args.input_file.is_none() {
        validate_gateway_url(&args.gateway_url)?;
    }

    parse_interval(&args.interval)
}

/// Execute the usage command
pub fn execute_usage(args: UsageArgs) -> Result<()> {
    let interval = parse_interval(&args.interval)?;

    let points = load_points(&args).context("Failed to load usage points")?;
    debug!("Loaded {} usage points", points.len());

    let chart = UsageChart::from_points(&points, interval);
    info!(
        "Bucketed into {} labels across {} axis slots",
        chart.series.len(),
        chart.axis.len()
    );

    if chart.axis.is_empty() {
        println!("No usage recorded.");
    } else {
        println!("{}", render_usage_table(&chart));
    }

    if let Some(path) = &args.output_json {
        let report = UsageReport {
            version: SCHEMA_VERSION.to_string(),
            chart,
            generated_at: chrono::Utc::now().to_rfc3339(),
        };
        write_report(&report, path).context("Failed to write usage report")?;
        info!("Report written to: {}", path.display());
    }

    Ok(())
}

fn parse_interval(interval: &str) -> Result<BucketInterval> {
    match interval {
        "minute" => Ok(BucketInterval::Minute),
        "hour" => Ok(BucketInterval::Hour),
        "day" => Ok(BucketInterval::Day),
        other => anyhow::bail!("Unknown interval '{}' (expected minute, hour or day)", other),
    }
}

fn load_points(args: &UsageArgs) -> Result<Vec<UsagePoint>> {
    if let Some(path) = &args.input_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let points: Vec<UsagePoint> = serde_json::from_str(&text)
            .with_context(|| format!("Invalid usage JSON in {}", path.display()))?;
        return Ok(points);
    }

    let client = DashboardClient::new(&args.gateway_url)
        .context("Failed to create dashboard client")?;
    let envelope = client
        .fetch_usage()
        .context("Failed to fetch usage from gateway")?;
    Ok(envelope.points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_args() -> UsageArgs {
        UsageArgs {
            gateway_url: "http://localhost:8787".to_string(),
            input_file: None,
            interval: "hour".to_string(),
            output_json: None,
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert_eq!(
            validate_args(&valid_args()).unwrap(),
            BucketInterval::Hour
        );
    }

    #[test]
    fn test_parse_interval_variants() {
        assert_eq!(parse_interval("minute").unwrap(), BucketInterval::Minute);
        assert_eq!(parse_interval("day").unwrap(), BucketInterval::Day);
        assert!(parse_interval("week").is_err());
    }

    #[test]
    fn test_validate_args_bad_url() {
        let args = UsageArgs {
            gateway_url: "localhost:8787".to_string(),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }
}
