//! HTTP access to the gateway's dashboard API.

pub mod client;
pub mod types;

// Re-export main types
pub use client::DashboardClient;
pub use types::{MetricsEnvelope, UsageEnvelope};
