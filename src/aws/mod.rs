//! AWS feed interaction.
//!
//! This module handles all contact with the published feed:
//! - [`fetch`] - HTTP retrieval of ip-ranges.json
//! - [`cache`] - on-disk snapshot of a fetched feed

mod cache;
mod fetch;

// Re-export public functions
pub use cache::read_feed_cache;
pub use fetch::fetch_ip_ranges;
