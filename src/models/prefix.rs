//! AWS ip-ranges feed data model.

use super::Cidr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One prefix record from the published feed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PrefixRecord {
    /// The advertised IPv4 block.
    pub ip_prefix: Cidr,
    /// AWS region code (e.g. "us-east-1").
    pub region: String,
    /// Service tag (e.g. "EC2", "AMAZON").
    pub service: String,
    /// Network border group, usually the region itself.
    #[serde(default)]
    pub network_border_group: Option<String>,
}

/// The full ip-ranges.json document.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct IpRanges {
    /// Feed snapshot token.
    #[serde(rename = "syncToken", default)]
    pub sync_token: String,
    /// Snapshot creation timestamp, feed-formatted.
    #[serde(rename = "createDate", default)]
    pub create_date: String,
    /// All advertised prefixes.
    pub prefixes: Vec<PrefixRecord>,
}

/// One filtered entry with a generated identifier.
///
/// Created once per feed record, never mutated. Merged blocks produced by
/// the consolidator are new synthetic values and carry no entry id.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegionEntry {
    /// Generated unique identifier for this entry.
    pub id: Uuid,
    /// AWS region code.
    pub region: String,
    /// Service tag.
    pub service: String,
    /// The advertised IPv4 block.
    pub ip_prefix: Cidr,
}

impl RegionEntry {
    /// Build an entry from a feed record, assigning a fresh id.
    pub fn from_record(record: &PrefixRecord) -> RegionEntry {
        RegionEntry {
            id: Uuid::new_v4(),
            region: record.region.clone(),
            service: record.service.clone(),
            ip_prefix: record.ip_prefix,
        }
    }
}
