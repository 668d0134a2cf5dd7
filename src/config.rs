//! Application constants.

/// Published AWS IP ranges feed.
pub const FEED_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";

/// Service tag the summary is scoped to.
pub const SERVICE_TAG: &str = "EC2";

/// Directory the raw feed snapshot is stored in.
pub const INCOMING_DIR: &str = "incoming";

/// Directory for per-region entry dumps.
pub const BY_REGION_DIR: &str = "ec2_by_region";

/// Directory for per-entry dumps of the filtered region.
pub const FILTERED_DIR: &str = "ec2_filtered";

/// Directory for consolidated block lists.
pub const CONSOLIDATED_DIR: &str = "consolidated";

/// File name of the feed snapshot inside [`INCOMING_DIR`].
pub const FEED_FILE: &str = "ip-ranges.json";

/// Pause unit for polite fetching, in milliseconds.
pub const SLEEP_MSEC: u64 = 100;
