//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for dashboard API requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Canonical bucket display key, minute granularity
pub const BUCKET_KEY_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Width of text timeline bars in characters
pub const TIMELINE_BAR_WIDTH: usize = 40;

// Dashboard API paths, relative to the gateway base URL
pub const METRICS_PATH: &str = "/api/dashboard/metrics";
pub const TRACES_PATH: &str = "/api/dashboard/traces";
pub const USAGE_PATH: &str = "/api/dashboard/usage";
