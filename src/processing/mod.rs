//! Feed data processing logic.
//!
//! This module contains the business logic for processing feed data:
//! - [`regions`] - region listing, validation and filtering
//! - [`consolidate`] - merging contiguous CIDR blocks

mod consolidate;
mod regions;

// Re-export public functions
pub use consolidate::{consolidate, subnet_size_table, ConsolidateError};
pub use regions::{check_characters, check_region, entries_by_region, filter_region, region_list};
