//! HTTP client for the gateway's dashboard API.

use super::types::{ApiErrorBody, MetricsEnvelope, UsageEnvelope};
use crate::parser::schema::Trace;
use crate::utils::config::{DEFAULT_HTTP_TIMEOUT, METRICS_PATH, TRACES_PATH, USAGE_PATH};
use crate::utils::error::ApiError;
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;

/// Client for fetching dashboard data from a running gateway
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    /// Create a new dashboard client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    /// Fetch the raw metrics exposition text
    pub fn fetch_metrics_text(&self) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, METRICS_PATH);
        info!("Fetching metrics from {}", url);

        let envelope: MetricsEnvelope = self.get_json(&url)?;
        debug!("Metrics scraped at {}", envelope.timestamp);

        Ok(envelope.metrics)
    }

    /// Fetch one trace with its spans
    pub fn fetch_trace(&self, request_id: &str) -> Result<Trace, ApiError> {
        let url = format!("{}{}/{}", self.base_url, TRACES_PATH, request_id);
        info!("Fetching trace for request: {}", request_id);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(ApiError::RequestFailed)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::TraceNotFound(request_id.to_string()));
        }
        let response = check_status(response)?;

        response.json::<Trace>().map_err(ApiError::RequestFailed)
    }

    /// Fetch raw usage points for bucketing
    pub fn fetch_usage(&self) -> Result<UsageEnvelope, ApiError> {
        let url = format!("{}{}", self.base_url, USAGE_PATH);
        info!("Fetching usage points from {}", url);

        self.get_json(&url)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(ApiError::RequestFailed)?;

        let response = check_status(response)?;
        response.json::<T>().map_err(ApiError::RequestFailed)
    }
}

/// Strip a trailing slash so path joins stay predictable
fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Map non-2xx responses to typed errors
fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .json::<ApiErrorBody>()
        .map(|b| b.error)
        .unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized(body)),
        _ => Err(ApiError::InvalidResponse(format!("HTTP {}: {}", status, body))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8787/".to_string()),
            "http://localhost:8787"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8787".to_string()),
            "http://localhost:8787"
        );
    }
}
