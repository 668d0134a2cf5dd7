//! On-disk result sink.
//!
//! Directory setup and JSON dumps of the per-region, per-entry and
//! consolidated results. Write failures are propagated, never retried.

use crate::config;
use crate::models::{Cidr, RegionEntry};
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

/// Recreate each listed directory, dropping anything left from a previous
/// run.
pub fn create_directories(dir_list: &[&str]) -> Result<(), Box<dyn Error>> {
    for dir in dir_list {
        if Path::new(dir).is_dir() {
            std::fs::remove_dir_all(dir)
                .map_err(|e| format!("Error removing directory {dir}: {e}"))?;
        }
        std::fs::create_dir(dir).map_err(|e| format!("Error creating directory {dir}: {e}"))?;
        log::debug!("Created directory {dir}");
    }
    Ok(())
}

/// Write a serializable payload as JSON to `<directory>/<file_name>`.
pub fn store_results<T: Serialize>(
    payload: &T,
    file_name: &str,
    directory: &str,
) -> Result<(), Box<dyn Error>> {
    let path = format!("{directory}/{file_name}");
    let json = serde_json::to_string(payload).map_err(|e| format!("Error serializing JSON: {e}"))?;
    std::fs::write(&path, json).map_err(|e| format!("Error writing file {path}: {e}"))?;
    Ok(())
}

/// Read a file from `<directory>/<file_name>`.
pub fn load_results(file_name: &str, directory: &str) -> Result<String, Box<dyn Error>> {
    let path = format!("{directory}/{file_name}");
    let body =
        std::fs::read_to_string(&path).map_err(|e| format!("Error reading file {path}: {e}"))?;
    Ok(body)
}

/// Dump every region's entries as `<region>.json` under `ec2_by_region/`.
pub fn write_regions(by_region: &HashMap<String, Vec<RegionEntry>>) -> Result<(), Box<dyn Error>> {
    for (region, entries) in by_region {
        store_results(entries, &format!("{region}.json"), config::BY_REGION_DIR)?;
    }
    log::info!(
        "Wrote {} region files to {}/",
        by_region.len(),
        config::BY_REGION_DIR
    );
    Ok(())
}

/// Dump each filtered entry as `<uuid>.json` under `ec2_filtered/`.
pub fn write_filtered_entries(entries: &[RegionEntry]) -> Result<(), Box<dyn Error>> {
    for entry in entries {
        store_results(entry, &format!("{}.json", entry.id), config::FILTERED_DIR)?;
    }
    log::info!(
        "Wrote {} entry files to {}/",
        entries.len(),
        config::FILTERED_DIR
    );
    Ok(())
}

/// Dump a region's consolidated block list under `consolidated/`.
pub fn write_consolidated(region: &str, blocks: &[Cidr]) -> Result<(), Box<dyn Error>> {
    store_results(
        &blocks,
        &format!("{region}.json"),
        config::CONSOLIDATED_DIR,
    )?;
    log::info!(
        "Wrote {count} consolidated blocks for {region} to {dir}/",
        count = blocks.len(),
        dir = config::CONSOLIDATED_DIR
    );
    Ok(())
}
