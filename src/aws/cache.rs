//! Snapshot cache for the ip-ranges feed.
//!
//! Avoids re-fetching the published feed when a snapshot from this run is
//! already on disk.

use super::fetch::fetch_ip_ranges;
use crate::config;
use crate::models::IpRanges;
use chrono::NaiveDateTime;
use std::error::Error;
use std::path::Path;

/// Read the feed snapshot from disk, or fetch and store it when missing.
///
/// # Arguments
/// * `cache_file` - Optional path to a specific snapshot file. If None,
///   uses `incoming/ip-ranges.json`.
///
/// # Returns
/// * `Ok(IpRanges)` - The parsed feed document
/// * `Err` - If an explicit snapshot path doesn't exist, the fetch fails,
///   or the document doesn't parse
pub async fn read_feed_cache(cache_file: Option<&str>) -> Result<IpRanges, Box<dyn Error>> {
    let cache_file = match cache_file {
        Some(file) => {
            if !Path::new(file).exists() {
                return Err(format!("Snapshot file does not exist: {file}").into());
            }
            log::info!("Using provided snapshot file: {file}");
            file.to_string()
        }
        None => format!("{}/{}", config::INCOMING_DIR, config::FEED_FILE),
    };

    let ranges = match std::fs::read_to_string(&cache_file) {
        Ok(json) => {
            log::info!("Reading from snapshot file: {cache_file}");
            parse_feed(&json)?
        }
        Err(_) => {
            log::warn!("Snapshot file not found: {cache_file}");
            let body = fetch_ip_ranges().await?;
            let ranges = parse_feed(&body)?;
            log::warn!("Writing feed snapshot to file: {cache_file}");
            std::fs::write(&cache_file, body)
                .map_err(|e| format!("Error writing snapshot file {cache_file}: {e}"))?;
            ranges
        }
    };

    log_snapshot_age(&ranges);
    log::info!(
        "Feed snapshot holds {} prefixes, syncToken={}",
        ranges.prefixes.len(),
        ranges.sync_token
    );

    Ok(ranges)
}

/// Parse the feed body, reporting the JSON path on failure.
fn parse_feed(body: &str) -> Result<IpRanges, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    let ranges: IpRanges = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        format!(
            "Error parsing feed JSON: path={path} error={e}",
            path = e.path()
        )
    })?;
    Ok(ranges)
}

/// Log how old the snapshot is, when its createDate parses.
fn log_snapshot_age(ranges: &IpRanges) {
    match NaiveDateTime::parse_from_str(&ranges.create_date, "%Y-%m-%d-%H-%M-%S") {
        Ok(created) => {
            let age = chrono::Utc::now().naive_utc() - created;
            log::info!(
                "Snapshot created {created}, {hours}h ago",
                hours = age.num_hours()
            );
        }
        Err(_) => log::warn!(
            "Could not parse snapshot createDate: '{}'",
            ranges.create_date
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_feed_cache_fixture() {
        let ranges = read_feed_cache(Some("src/tests/test_data/ip_ranges_test_01.json"))
            .await
            .expect("Error reading feed snapshot");
        assert!(!ranges.prefixes.is_empty(), "Prefixes should not be empty");
        assert_eq!(ranges.sync_token, "1756200000");
        assert_eq!(
            ranges.prefixes[0].region, "us-east-1",
            "Wrong first region in test sample."
        );
    }

    #[tokio::test]
    async fn test_read_feed_cache_missing_explicit_path() {
        let err = read_feed_cache(Some("src/tests/test_data/no_such_snapshot.json"))
            .await
            .expect_err("Missing explicit snapshot must fail");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_parse_feed_reports_path() {
        let bad = r#"{"syncToken": "1", "createDate": "x", "prefixes": [{"ip_prefix": 42}]}"#;
        let err = parse_feed(bad).expect_err("Bad feed must fail");
        assert!(
            err.to_string().contains("prefixes[0]"),
            "Expected JSON path in error, got: {err}"
        );
    }
}
