//! Metrics command implementation.
//!
//! Scrapes the gateway's exposition text (or reads it from a file),
//! aggregates it into named counters, and prints a table. With
//! `--group-by` a single metric is broken down by one of its labels.

use super::trace::validate_gateway_url;
use anyhow::{Context, Result};
use gateway_dash::api::DashboardClient;
use gateway_dash::output::{render_metrics_table, write_report};
use gateway_dash::parser::schema::MetricsReport;
use gateway_dash::parser::{group_metric, parse_metrics_lines, parse_metrics_text};
use gateway_dash::utils::config::SCHEMA_VERSION;
use log::{debug, info};
use std::path::PathBuf;

/// Label keys the gateway attaches to its routing metrics
const GROUP_KEYS: &[&str] = &["provider", "model", "api_key", "instance", "all"];

/// Arguments for the metrics command
#[derive(Debug, Clone)]
pub struct MetricsArgs {
    /// Gateway base URL
    pub gateway_url: String,

    /// Read exposition text from a file instead of the gateway
    pub input_file: Option<PathBuf>,

    /// Break one metric down by this label key
    pub group_by: Option<String>,

    /// Metric name to group (required with --group-by)
    pub metric: Option<String>,

    /// Optional JSON report path
    pub output_json: Option<PathBuf>,
}

/// Validate metrics command arguments
pub fn validate_args(args: &MetricsArgs) -> Result<()> {
    if args.input_file.is_none() {
        validate_gateway_url(&args.gateway_url)?;
    }

    if let Some(group_by) = &args.group_by {
        if !GROUP_KEYS.contains(&group_by.as_str()) {
            anyhow::bail!(
                "Unknown group key '{}' (expected one of: {})",
                group_by,
                GROUP_KEYS.join(", ")
            );
        }
        if args.metric.is_none() {
            anyhow::bail!("--group-by requires --metric");
        }
    }

    Ok(())
}

/// Execute the metrics command
pub fn execute_metrics(args: MetricsArgs) -> Result<()> {
    let text = load_metrics_text(&args).context("Failed to load metrics text")?;
    debug!("Loaded {} bytes of exposition text", text.len());

    let totals = parse_metrics_text(&text);
    info!("Aggregated {} metrics", totals.len());

    match (&args.group_by, &args.metric) {
        (Some(group_by), Some(metric)) => {
            let lines = parse_metrics_lines(&text);
            let grouped = group_metric(&lines, metric, group_by);
            println!("{} by {}:", metric, group_by);
            println!("{}", render_metrics_table(&grouped));
        }
        _ => {
            println!("{}", render_metrics_table(&totals));
        }
    }

    if let Some(path) = &args.output_json {
        let report = MetricsReport {
            version: SCHEMA_VERSION.to_string(),
            metrics: totals,
            generated_at: chrono::Utc::now().to_rfc3339(),
        };
        write_report(&report, path).context("Failed to write metrics report")?;
        info!("Report written to: {}", path.display());
    }

    Ok(())
}

fn load_metrics_text(args: &MetricsArgs) -> Result<String> {
    if let Some(path) = &args.input_file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()));
    }

    let client = DashboardClient::new(&args.gateway_url)
        .context("Failed to create dashboard client")?;
    let text = client
        .fetch_metrics_text()
        .context("Failed to fetch metrics from gateway")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_args() -> MetricsArgs {
        MetricsArgs {
            gateway_url: "http://localhost:8787".to_string(),
            input_file: None,
            group_by: None,
            metric: None,
            output_json: None,
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&valid_args()).is_ok());
    }

    #[test]
    fn test_validate_args_unknown_group_key() {
        let args = MetricsArgs {
            group_by: Some("region".to_string()),
            metric: Some("llm_requests_total".to_string()),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_group_by_requires_metric() {
        let args = MetricsArgs {
            group_by: Some("provider".to_string()),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_group_by_with_metric() {
        let args = MetricsArgs {
            group_by: Some("provider".to_string()),
            metric: Some("llm_requests_total".to_string()),
            ..valid_args()
        };
        assert!(validate_args(&args).is_ok());
    }
}
