//! Gateway Dash
//!
//! Trace, metrics and usage aggregation for LLM
//! request-routing gateways.
//!
//! This crate provides the core implementation for the
//! `gateway-dash` CLI tool: it rebuilds call trees from flat
//! span lists, projects span timelines, aggregates the
//! gateway's metrics exposition text, and buckets raw usage
//! events for charting.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install gateway-dash
//! gateway-dash --help
//! ```

pub mod aggregator;
pub mod api;
pub mod output;
pub mod parser;
pub mod utils;
