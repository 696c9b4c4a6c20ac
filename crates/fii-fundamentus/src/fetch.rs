//! HTTP fetch helper shared by the listing and detail scrapers.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Browser User-Agent; the site blocks requests without one.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/58.0.3029.110 Safari/537.36";

/// Per-request timeout.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the HTTP client used for all page fetches.
pub(crate) fn build_client() -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

/// GETs a URL and returns the body text.
///
/// Any transport failure (timeout, connection error, non-2xx) is logged with
/// the URL and surfaces as `None`. Callers treat `None` as "no data"; no
/// retries are attempted.
pub(crate) async fn fetch_html(client: &Client, url: &str) -> Option<String> {
    debug!(url, "Fetching page");

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            error!(url, error = %e, "Request failed");
            return None;
        }
    };

    if !response.status().is_success() {
        error!(url, status = %response.status(), "Request returned non-success status");
        return None;
    }

    match response.text().await {
        Ok(body) => Some(body),
        Err(e) => {
            error!(url, error = %e, "Failed to read response body");
            None
        }
    }
}
