//! Trace command implementation.
//!
//! The trace command:
//! 1. Fetches a trace from the gateway (or reads a JSON file)
//! 2. Rebuilds the call tree forest
//! 3. Projects the span timeline
//! 4. Prints both and optionally writes a JSON report

use anyhow::{Context, Result};
use gateway_dash::aggregator::TraceView;
use gateway_dash::api::DashboardClient;
use gateway_dash::output::{render_span_tree, render_timeline, write_report};
use gateway_dash::parser::schema::{Trace, TraceReport};
use gateway_dash::utils::config::SCHEMA_VERSION;
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the trace command
#[derive(Debug, Clone)]
pub struct TraceArgs {
    /// Gateway base URL
    pub gateway_url: String,

    /// Request to inspect
    pub request_id: String,

    /// Read the trace from a JSON file instead of the gateway
    pub input_file: Option<PathBuf>,

    /// Optional JSON report path
    pub output_json: Option<PathBuf>,
}

/// Validate trace command arguments
pub fn validate_args(args: &TraceArgs) -> Result<()> {
    if args.input_file.is_none() {
        validate_gateway_url(&args.gateway_url)?;
    }

    if args.request_id.is_empty() && args.input_file.is_none() {
        anyhow::bail!("Request ID cannot be empty");
    }

    Ok(())
}

/// Execute the trace command
pub fn execute_trace(args: TraceArgs) -> Result<()> {
    info!("Inspecting trace: {}", args.request_id);

    let trace = load_trace(&args).context("Failed to load trace")?;

    debug!(
        "Trace {}: {} spans, provider={}, model={}",
        trace.request_id,
        trace.spans.len(),
        trace.provider,
        trace.model
    );

    let view = TraceView::from_trace(&trace);

    println!(
        "Trace {} ({} / {}, {} ms, {} tokens)",
        trace.request_id, trace.provider, trace.model, trace.duration_ms, trace.total_tokens
    );
    println!();

    if view.roots.is_empty() {
        println!("No spans recorded for this request.");
    } else {
        println!("{}", render_span_tree(&view.roots));
    }

    if let Some(timeline) = &view.timeline {
        println!("Timeline:");
        println!("{}", render_timeline(timeline));
    }

    if let Some(path) = &args.output_json {
        let report = TraceReport {
            version: SCHEMA_VERSION.to_string(),
            request_id: view.request_id.clone(),
            roots: view.roots,
            timeline: view.timeline,
            generated_at: chrono::Utc::now().to_rfc3339(),
        };
        write_report(&report, path).context("Failed to write trace report")?;
        info!("Report written to: {}", path.display());
    }

    Ok(())
}

/// Load the trace from the gateway or a local JSON file
fn load_trace(args: &TraceArgs) -> Result<Trace> {
    if let Some(path) = &args.input_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let trace: Trace = serde_json::from_str(&text)
            .with_context(|| format!("Invalid trace JSON in {}", path.display()))?;
        return Ok(trace);
    }

    let client = DashboardClient::new(&args.gateway_url)
        .context("Failed to create dashboard client")?;
    let trace = client
        .fetch_trace(&args.request_id)
        .with_context(|| format!("Failed to fetch trace {}", args.request_id))?;
    Ok(trace)
}

/// Shared URL validation for fetching commands
pub fn validate_gateway_url(url: &str) -> Result<()> {
    if url.is_empty() {
        anyhow::bail!("Gateway URL cannot be empty");
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("Gateway URL must start with http:// or https://");
    }

    Ok(())
}
