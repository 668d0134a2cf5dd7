//! Feed retrieval from the published AWS endpoint.

use crate::config;
use std::error::Error;

/// Fetch the raw ip-ranges feed document.
///
/// # Returns
/// * `Ok(String)` - The feed body as JSON text
/// * `Err` - If the request fails or returns a non-success status
pub async fn fetch_ip_ranges() -> Result<String, Box<dyn Error>> {
    log::info!("Fetching feed from {}", config::FEED_URL);

    let response = reqwest::get(config::FEED_URL)
        .await
        .map_err(|e| format!("Failed to fetch feed: {e}"))?;

    if !response.status().is_success() {
        return Err(format!(
            "Feed request failed with status {status} for {url}",
            status = response.status(),
            url = config::FEED_URL
        )
        .into());
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read feed body: {e}"))?;

    log::info!("Fetched feed, {} bytes", body.len());

    // Rate limiting pause
    tokio::time::sleep(std::time::Duration::from_millis(config::SLEEP_MSEC)).await;

    Ok(body)
}
