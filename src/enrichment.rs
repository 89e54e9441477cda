//! Destination enrichment via the Wikipedia REST summary API
//!
//! This module provides the HTTP client used to retrieve a short free-text
//! summary of a destination. The pipeline must keep running when the summary
//! service is unavailable, so every failure mode degrades to a fixed fallback
//! sentence instead of aborting the request: a missing `extract` field (or an
//! unparseable body) becomes [`NO_INFORMATION_FOUND`], and non-200 statuses as
//! well as transport failures become [`NO_RESULTS_FOUND`].

use crate::config::EnrichmentConfig;
use crate::models::EnrichmentResult;
use crate::{ItinerAiError, Result};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Fallback text for a 200 response without a usable summary
pub const NO_INFORMATION_FOUND: &str = "No information found.";
/// Fallback text for non-200 responses and transport failures
pub const NO_RESULTS_FOUND: &str = "No results found.";

/// Relevant subset of the REST summary response body
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    /// Plain-text page extract
    extract: Option<String>,
}

/// HTTP client for the destination summary endpoint
pub struct EnrichmentClient {
    /// HTTP client
    client: reqwest::blocking::Client,
    /// Base URL of the REST summary API
    base_url: String,
}

impl EnrichmentClient {
    /// Create a new enrichment client
    pub fn new(config: &EnrichmentConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                ItinerAiError::enrichment(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the summary text for a destination.
    ///
    /// Infallible by design: any failure collapses into one of the fixed
    /// fallback sentences so the planning pipeline can continue.
    #[instrument(skip(self))]
    pub fn fetch_summary(&self, destination: &str) -> EnrichmentResult {
        info!("Fetching destination summary for '{}'", destination);
        let start_time = Instant::now();

        let url = summary_url(&self.base_url, destination);
        debug!("Summary API request URL: {}", url);

        let text = match self.client.get(&url).send() {
            Ok(response) => {
                let status = response.status().as_u16();
                debug!(
                    "Summary API response: HTTP {} in {:.3}s",
                    status,
                    start_time.elapsed().as_secs_f64()
                );
                match response.text() {
                    Ok(body) => summary_from_response(status, &body),
                    Err(e) => {
                        warn!("Failed to read summary response body: {}", e);
                        NO_RESULTS_FOUND.to_string()
                    }
                }
            }
            Err(e) => {
                // Timeouts, DNS failures, and connection resets land here and
                // degrade to the same fallback as an HTTP error status.
                warn!("Summary request for '{}' failed: {}", destination, e);
                NO_RESULTS_FOUND.to_string()
            }
        };

        info!(
            "Destination summary resolved in {:.3}s ({} chars)",
            start_time.elapsed().as_secs_f64(),
            text.len()
        );

        EnrichmentResult { text }
    }
}

/// Build the summary endpoint URL with the destination percent-encoded.
///
/// The destination lands in a URL path segment, so names with spaces or
/// non-ASCII characters must be encoded before substitution.
fn summary_url(base_url: &str, destination: &str) -> String {
    format!(
        "{}/page/summary/{}",
        base_url,
        urlencoding::encode(destination)
    )
}

/// Map an HTTP status and body to the summary text contract.
///
/// HTTP 200 with an `extract` field yields that field verbatim; 200 without
/// it (or with an unparseable body) yields [`NO_INFORMATION_FOUND`]; any
/// other status yields [`NO_RESULTS_FOUND`].
fn summary_from_response(status: u16, body: &str) -> String {
    if status != 200 {
        return NO_RESULTS_FOUND.to_string();
    }

    match serde_json::from_str::<SummaryResponse>(body) {
        Ok(SummaryResponse {
            extract: Some(extract),
        }) => extract,
        Ok(SummaryResponse { extract: None }) => NO_INFORMATION_FOUND.to_string(),
        Err(e) => {
            warn!("Failed to parse summary response body: {}", e);
            NO_INFORMATION_FOUND.to_string()
        }
    }
}
