//! IPv4 CIDR block model.
//!
//! Provides the [`Cidr`] struct representing one IPv4 network block as a
//! base address plus prefix length, along with the bit arithmetic the
//! consolidator depends on.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Errors from CIDR parsing and arithmetic.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CidrError {
    #[error("invalid prefix length {0}, must be 0-32")]
    InvalidPrefixLength(u8),
    #[error("invalid CIDR notation: {0}")]
    InvalidCidr(String),
}

/// Convert a prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use aws_prefix_summary::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, CidrError> {
    if len > MAX_LENGTH {
        Err(CidrError::InvalidPrefixLength(len))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Clear host bits, returning the network address for the given prefix length.
pub fn mask_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, CidrError> {
    let masked = u32::from(addr) & get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(masked))
}

/// Number of addresses in a block of the given prefix length.
pub fn block_size(len: u8) -> Result<u64, CidrError> {
    if len > MAX_LENGTH {
        Err(CidrError::InvalidPrefixLength(len))
    } else {
        Ok(1u64 << (MAX_LENGTH - len))
    }
}

/// IPv4 network block in CIDR notation.
///
/// Invariant: `addr` has all bits below `prefix_len` cleared. The
/// constructors enforce this by masking.
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Cidr {
    /// Base (network) address of the block.
    pub addr: Ipv4Addr,
    /// Prefix length (0-32).
    pub prefix_len: u8,
}

impl Cidr {
    /// Create a new [`Cidr`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// The address is normalized to the block's network boundary.
    pub fn new(addr_cidr: &str) -> Result<Cidr, CidrError> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(CidrError::InvalidCidr(addr_cidr.to_string()));
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| CidrError::InvalidCidr(addr_cidr.to_string()))?;
        let prefix_len: u8 = parts[1]
            .parse()
            .map_err(|_| CidrError::InvalidCidr(addr_cidr.to_string()))?;
        Cidr::from_parts(addr, prefix_len)
    }

    /// Create a [`Cidr`] from an address and prefix length, masking host bits.
    pub fn from_parts(addr: Ipv4Addr, prefix_len: u8) -> Result<Cidr, CidrError> {
        let addr = mask_addr(addr, prefix_len)?;
        Ok(Cidr { addr, prefix_len })
    }

    /// The block's network address as a [`Cidr`] (host bits cleared).
    ///
    /// Constructors already normalize, so this is the identity for any
    /// value built through them.
    pub fn network(&self) -> Cidr {
        let addr = mask_addr(self.addr, self.prefix_len)
            .unwrap_or_else(|e| panic!("Error masking {}: {}", self, e));
        Cidr {
            addr,
            prefix_len: self.prefix_len,
        }
    }

    /// Number of addresses in this block: `2^(32 - prefix_len)`.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix_len)
    }

    /// The address immediately following this block, or `None` when the
    /// block ends at the top of the address space.
    ///
    /// A following block is contiguous iff its base equals this address;
    /// overflow means "no next address", never a wrapped one.
    pub fn next_address(&self) -> Option<Ipv4Addr> {
        let size = u32::try_from(self.size()).ok()?;
        u32::from(self.addr).checked_add(size).map(Ipv4Addr::from)
    }
}

impl Serialize for Cidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.prefix_len);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Cidr {
    fn deserialize<D>(deserializer: D) -> Result<Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(de::Error::custom(format!("invalid CIDR format: {}", s)));
        }

        let addr = Ipv4Addr::from_str(parts[0])
            .map_err(|_| de::Error::custom(format!("invalid IP address: {}", parts[0])))?;
        let prefix_len = u8::from_str(parts[1])
            .map_err(|_| de::Error::custom(format!("invalid prefix length: {}", parts[1])))?;

        Cidr::from_parts(addr, prefix_len)
            .map_err(|e| de::Error::custom(format!("invalid CIDR {}: {}", s, e)))
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}
