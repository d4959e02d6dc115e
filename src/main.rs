//! Gateway Dash CLI
//!
//! A monitoring companion for LLM request-routing gateways.
//! Inspects traces, aggregates metrics and buckets usage from a
//! running gateway's dashboard API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

mod commands;

use commands::{execute_metrics, execute_trace, execute_usage, MetricsArgs, TraceArgs, UsageArgs};
use gateway_dash::utils::config::SCHEMA_VERSION;

/// Gateway Dash - trace, metrics and usage views for routing gateways
#[derive(Parser, Debug)]
#[command(name = "gateway-dash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect one request's trace: call tree and timeline
    Trace {
        /// Gateway base URL
        #[arg(short, long, default_value = "http://localhost:8787", env = "GATEWAY_URL")]
        gateway: String,

        /// Request ID to inspect
        #[arg(short, long, default_value = "")]
        request: String,

        /// Read the trace from a JSON file instead of the gateway
        #[arg(long)]
        file: Option<PathBuf>,

        /// Write a JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Aggregate the gateway's metrics exposition text
    Metrics {
        /// Gateway base URL
        #[arg(short, long, default_value = "http://localhost:8787", env = "GATEWAY_URL")]
        gateway: String,

        /// Read exposition text from a file instead of the gateway
        #[arg(long)]
        file: Option<PathBuf>,

        /// Break one metric down by this label key
        /// (provider, model, api_key, instance, all)
        #[arg(long)]
        group_by: Option<String>,

        /// Metric name to group (required with --group-by)
        #[arg(long)]
        metric: Option<String>,

        /// Write a JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Bucket raw usage observations for charting
    Usage {
        /// Gateway base URL
        #[arg(short, long, default_value = "http://localhost:8787", env = "GATEWAY_URL")]
        gateway: String,

        /// Read usage points from a JSON file instead of the gateway
        #[arg(long)]
        file: Option<PathBuf>,

        /// Bucket width: minute, hour or day
        #[arg(short, long, default_value = "hour")]
        interval: String,

        /// Write a JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Trace {
            gateway,
            request,
            file,
            output,
        } => {
            let args = TraceArgs {
                gateway_url: gateway,
                request_id: request,
                input_file: file,
                output_json: output,
            };

            commands::trace::validate_args(&args)?;
            execute_trace(args)?;
        }

        Commands::Metrics {
            gateway,
            file,
            group_by,
            metric,
            output,
        } => {
            let args = MetricsArgs {
                gateway_url: gateway,
                input_file: file,
                group_by,
                metric,
                output_json: output,
            };

            commands::metrics::validate_args(&args)?;
            execute_metrics(args)?;
        }

        Commands::Usage {
            gateway,
            file,
            interval,
            output,
        } => {
            let args = UsageArgs {
                gateway_url: gateway,
                input_file: file,
                interval,
                output_json: output,
            };

            commands::usage::validate_args(&args)?;
            execute_usage(args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
fn display_version() {
    println!("Gateway Dash v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Trace, metrics and usage views for LLM request-routing gateways.");
}
