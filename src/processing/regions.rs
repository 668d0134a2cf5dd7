//! Region listing, validation and filtering.
//!
//! Narrows the feed to the service of interest and one region, producing
//! the sorted, de-duplicated block list the consolidator consumes. All
//! lookups work on data passed in; nothing is memoized process-wide.

use crate::config;
use crate::models::{Cidr, IpRanges, PrefixRecord, RegionEntry};
use itertools::Itertools;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::sync::OnceLock;

/// Regex for allowed region name characters.
static REGION_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_region_regex() -> &'static Regex {
    REGION_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").expect("Invalid Regex"))
}

/// Records from the feed carrying the service tag of interest.
fn service_records(ranges: &IpRanges) -> impl Iterator<Item = &PrefixRecord> {
    ranges
        .prefixes
        .iter()
        .filter(|p| p.service == config::SERVICE_TAG)
}

/// Sorted, de-duplicated region codes present in the feed.
pub fn region_list(ranges: &IpRanges) -> Vec<String> {
    service_records(ranges)
        .map(|p| p.region.clone())
        .sorted()
        .dedup()
        .collect()
}

/// Validate region name characters: non-empty, `[a-z0-9-]` only.
///
/// Case sensitive, matching the published region codes.
pub fn check_characters(region: &str) -> Result<(), Box<dyn Error>> {
    if region.is_empty() {
        return Err("No region passed. Must supply a region.".into());
    }
    if !get_region_regex().is_match(region) {
        return Err(format!(
            "May only use [0-9], [a-z] or '-' characters for a region, got '{region}'."
        )
        .into());
    }
    Ok(())
}

/// Validate that a region exists in the feed.
pub fn check_region(region: &str, regions: &[String]) -> Result<(), Box<dyn Error>> {
    if regions.iter().any(|r| r == region) {
        Ok(())
    } else {
        Err(format!(
            "'{region}' is not a valid region.\nValid regions: {}",
            regions.join(", ")
        )
        .into())
    }
}

/// Group the feed's service records into entries keyed by region.
///
/// Every region from [`region_list`] is present, even when empty.
pub fn entries_by_region(ranges: &IpRanges) -> HashMap<String, Vec<RegionEntry>> {
    let mut out: HashMap<String, Vec<RegionEntry>> = region_list(ranges)
        .into_iter()
        .map(|region| (region, Vec::new()))
        .collect();

    for record in service_records(ranges) {
        if let Some(entries) = out.get_mut(&record.region) {
            entries.push(RegionEntry::from_record(record));
        }
    }

    log::info!(
        "Grouped {} records into {} regions",
        out.values().map(|v| v.len()).sum::<usize>(),
        out.len()
    );
    out
}

/// Blocks for one region as the consolidator expects them: ascending by
/// base address, duplicates removed.
pub fn filter_region(ranges: &IpRanges, region: &str) -> Vec<Cidr> {
    service_records(ranges)
        .filter(|p| p.region == region)
        .map(|p| p.ip_prefix)
        .sorted()
        .dedup()
        .collect()
}
