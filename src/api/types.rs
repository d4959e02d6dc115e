//! Response envelopes for the gateway's dashboard API.
//!
//! The gateway wraps panel data in thin timestamped envelopes; traces
//! and usage points come back as plain JSON of the wire schema types.

use crate::parser::schema::UsagePoint;
use serde::Deserialize;

/// Envelope for `GET /api/dashboard/metrics`.
///
/// The `metrics` field is the raw exposition text; parsing happens
/// client-side so the gateway stays format-agnostic.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsEnvelope {
    /// RFC 3339 scrape timestamp
    pub timestamp: String,

    /// Raw exposition text
    pub metrics: String,
}

/// Envelope for `GET /api/dashboard/usage`.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageEnvelope {
    #[serde(default)]
    pub points: Vec<UsagePoint>,
}

/// Error body the gateway returns on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
}
