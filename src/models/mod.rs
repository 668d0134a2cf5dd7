//! Domain models for the AWS prefix summary.
//!
//! This module contains the core data structures used throughout the
//! application:
//! - [`Cidr`] - IPv4 network block with CIDR notation support
//! - [`PrefixRecord`] and [`IpRanges`] - the published feed document
//! - [`RegionEntry`] - one filtered record with a generated id

mod ipv4;
mod prefix;

// Re-export public types
pub use ipv4::{block_size, get_cidr_mask, mask_addr, Cidr, CidrError, MAX_LENGTH};
pub use prefix::{IpRanges, PrefixRecord, RegionEntry};
