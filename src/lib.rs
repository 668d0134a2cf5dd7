// cargo watch -x 'fmt' -x 'run'  // 'run -- us-east-1'

pub mod aws;
pub mod config;
pub mod models;
pub mod output;
pub mod processing;

use models::Cidr;
use std::error::Error;

/// Full workflow for one region: validate, snapshot the feed, dump the
/// per-region and per-entry records, consolidate and store the result.
///
/// # Arguments
/// * `region` - The region code to summarize
/// * `cache_file` - Optional feed snapshot path (tests/offline runs)
pub async fn run_region_summary(
    region: &str,
    cache_file: Option<&str>,
) -> Result<Vec<Cidr>, Box<dyn Error>> {
    processing::check_characters(region)?;

    output::create_directories(&[
        config::INCOMING_DIR,
        config::BY_REGION_DIR,
        config::FILTERED_DIR,
        config::CONSOLIDATED_DIR,
    ])?;

    let ranges = aws::read_feed_cache(cache_file).await?;

    let regions = processing::region_list(&ranges);
    processing::check_region(region, &regions)?;

    let by_region = processing::entries_by_region(&ranges);
    output::write_regions(&by_region)?;

    let entries = by_region
        .get(region)
        .ok_or_else(|| format!("No entries grouped for region {region}"))?;
    output::write_filtered_entries(entries)?;

    let blocks = processing::filter_region(&ranges, region);
    let consolidated = processing::consolidate(&blocks)?;
    output::write_consolidated(region, &consolidated)?;
    output::print_summary(region, &blocks, &consolidated);

    Ok(consolidated)
}
