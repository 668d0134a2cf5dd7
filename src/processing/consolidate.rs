//! CIDR block consolidation.
//!
//! Merges maximal runs of contiguous blocks in a sorted list into single
//! larger aligned blocks wherever the combined size matches a valid prefix
//! length. Runs that are contiguous but cannot be expressed as one block
//! pass through unchanged.

use crate::models::{block_size, Cidr};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors from [`consolidate`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConsolidateError {
    #[error("input not sorted ascending at index {index}: {prev} followed by {next}")]
    UnsortedInput {
        index: usize,
        prev: Cidr,
        next: Cidr,
    },
}

/// Block size to prefix length, for prefix lengths 8 through 31.
static SUBNET_SIZE_TABLE: OnceLock<HashMap<u64, u8>> = OnceLock::new();

/// Fixed mapping from block size (power of two) to the prefix length that
/// produces that size. A run may only collapse into one block when its
/// total size appears here.
pub fn subnet_size_table() -> &'static HashMap<u64, u8> {
    SUBNET_SIZE_TABLE.get_or_init(|| {
        (8..=31)
            .map(|len| {
                let size = block_size(len).expect("prefix length 8-31 is always valid");
                (size, len)
            })
            .collect()
    })
}

/// Accumulator for the run of contiguous blocks currently being collected.
struct Run {
    start: Cidr,
    members: Vec<Cidr>,
    size: u64,
}

impl Run {
    fn begin(block: Cidr) -> Run {
        Run {
            start: block,
            members: vec![block],
            size: block.size(),
        }
    }

    fn extend(&mut self, block: Cidr) {
        self.members.push(block);
        self.size += block.size();
    }

    /// Collapse the run into one synthesized block, or return the members
    /// unchanged when the combined size has no matching prefix length.
    fn close(self) -> Vec<Cidr> {
        match subnet_size_table().get(&self.size) {
            Some(&prefix_len) => {
                log::debug!(
                    "merging {} blocks at {} into /{prefix_len}",
                    self.members.len(),
                    self.start
                );
                // The size lookup does not verify that the run start is
                // aligned to the new prefix length; the start address is
                // kept as-is.
                vec![Cidr {
                    addr: self.start.addr,
                    prefix_len,
                }]
            }
            None => {
                log::debug!(
                    "run of {} blocks at {} has size {} with no single-prefix equivalent",
                    self.members.len(),
                    self.start,
                    self.size
                );
                self.members
            }
        }
    }
}

/// Consolidate a list of CIDR blocks sorted ascending by base address.
///
/// Single left-to-right pass. Every maximal run of contiguous blocks whose
/// combined size maps to a valid prefix length is replaced by one block
/// starting at the run's first base; all other blocks are emitted
/// unchanged, in input order. Empty input yields an empty output.
///
/// # Errors
/// [`ConsolidateError::UnsortedInput`] when a block's base address is
/// lower than its predecessor's. The input is never re-sorted here; an
/// unsorted list means an upstream bug.
pub fn consolidate(blocks: &[Cidr]) -> Result<Vec<Cidr>, ConsolidateError> {
    let mut out: Vec<Cidr> = Vec::with_capacity(blocks.len());
    let mut run: Option<Run> = None;

    for (i, &block) in blocks.iter().enumerate() {
        let next = blocks.get(i + 1);

        if let Some(next) = next {
            if next.addr < block.addr {
                return Err(ConsolidateError::UnsortedInput {
                    index: i,
                    prev: block,
                    next: *next,
                });
            }
        }

        // Overflow past the top of the address space is "no next address"
        // and therefore never contiguous.
        let contiguous_with_next = match (block.next_address(), next) {
            (Some(after), Some(next)) => after == next.addr,
            _ => false,
        };

        if contiguous_with_next {
            match run.as_mut() {
                Some(run) => run.extend(block),
                None => run = Some(Run::begin(block)),
            }
        } else if let Some(mut open_run) = run.take() {
            // This block closes the run begun by its predecessor.
            open_run.extend(block);
            out.extend(open_run.close());
        } else {
            out.push(block);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidrs(specs: &[&str]) -> Vec<Cidr> {
        specs
            .iter()
            .map(|s| Cidr::new(s).expect("Error parsing test CIDR"))
            .collect()
    }

    /// Covered address ranges as (start, end-exclusive) pairs, merged.
    fn coverage(blocks: &[Cidr]) -> Vec<(u64, u64)> {
        let mut ranges: Vec<(u64, u64)> = blocks
            .iter()
            .map(|b| {
                let start = u32::from(b.addr) as u64;
                (start, start + b.size())
            })
            .collect();
        ranges.sort();
        let mut merged: Vec<(u64, u64)> = Vec::new();
        for (start, end) in ranges {
            match merged.last_mut() {
                Some(last) if last.1 >= start => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }
        merged
    }

    #[test]
    fn test_subnet_size_table() {
        let table = subnet_size_table();
        assert_eq!(table.len(), 24, "Expected one entry per prefix 8-31");
        assert_eq!(table.get(&256), Some(&24));
        assert_eq!(table.get(&2), Some(&31));
        assert_eq!(table.get(&16777216), Some(&8));
        assert_eq!(table.get(&1), None, "/32 size is outside the table");
        assert_eq!(table.get(&196608), None, "non power of two");
    }

    #[test]
    fn test_merge_two_halves_into_one() {
        let input = cidrs(&["10.0.0.0/25", "10.0.0.128/25"]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(out, cidrs(&["10.0.0.0/24"]));
    }

    #[test]
    fn test_merge_three_blocks_into_slash_23() {
        let input = cidrs(&["10.0.0.0/25", "10.0.0.128/25", "10.0.1.0/24"]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(out, cidrs(&["10.0.0.0/23"]));
    }

    #[test]
    fn test_contiguous_but_not_power_of_two_stays_unmerged() {
        // 2^17 + 2^16 = 196608 has no single-prefix equivalent.
        let input = cidrs(&["55.2.0.0/15", "55.4.0.0/16"]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(out, input);
    }

    #[test]
    fn test_single_block_passes_through() {
        let input = cidrs(&["192.168.1.0/24"]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(out, input);
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        let out = consolidate(&[]).expect("Error consolidating");
        assert!(out.is_empty());
    }

    #[test]
    fn test_gap_between_blocks_prevents_merge() {
        let input = cidrs(&["10.0.0.0/25", "10.0.1.0/25"]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(out, input);
    }

    #[test]
    fn test_mixed_runs_and_singletons() {
        let input = cidrs(&[
            "10.0.0.0/25",
            "10.0.0.128/25", // merges with previous into 10.0.0.0/24
            "10.1.0.0/24",   // singleton
            "55.2.0.0/15",
            "55.4.0.0/16", // contiguous, size not mergeable
            "192.168.0.0/24",
        ]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(
            out,
            cidrs(&[
                "10.0.0.0/24",
                "10.1.0.0/24",
                "55.2.0.0/15",
                "55.4.0.0/16",
                "192.168.0.0/24",
            ])
        );
    }

    #[test]
    fn test_four_quarters_merge() {
        let input = cidrs(&[
            "10.0.0.0/26",
            "10.0.0.64/26",
            "10.0.0.128/26",
            "10.0.0.192/26",
        ]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(out, cidrs(&["10.0.0.0/24"]));
    }

    #[test]
    fn test_top_of_address_space_does_not_wrap() {
        // 255.255.255.0/24 has no next address; 0.0.0.0/24 sorts first so
        // the pair below is the highest block alone.
        let input = cidrs(&["255.255.254.0/24", "255.255.255.0/24"]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(out, cidrs(&["255.255.254.0/23"]));

        let input = cidrs(&["255.255.255.0/24"]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(out, input);
    }

    #[test]
    fn test_unsorted_input_is_an_error() {
        let input = cidrs(&["10.0.1.0/24", "10.0.0.0/24"]);
        let err = consolidate(&input).expect_err("Unsorted input must fail");
        assert_eq!(
            err,
            ConsolidateError::UnsortedInput {
                index: 0,
                prev: Cidr::new("10.0.1.0/24").unwrap(),
                next: Cidr::new("10.0.0.0/24").unwrap(),
            }
        );
    }

    #[test]
    fn test_coverage_preserved() {
        let input = cidrs(&[
            "10.0.0.0/25",
            "10.0.0.128/25",
            "10.0.1.0/24",
            "10.20.0.0/16",
            "55.2.0.0/15",
            "55.4.0.0/16",
            "192.168.1.0/24",
        ]);
        let out = consolidate(&input).expect("Error consolidating");
        assert_eq!(
            coverage(&out),
            coverage(&input),
            "Output must cover exactly the input addresses"
        );
    }

    #[test]
    fn test_output_sorted_and_non_overlapping() {
        let input = cidrs(&[
            "10.0.0.0/25",
            "10.0.0.128/25",
            "10.1.0.0/24",
            "10.1.1.0/24",
        ]);
        let out = consolidate(&input).expect("Error consolidating");
        for pair in out.windows(2) {
            assert!(pair[0].addr < pair[1].addr, "Output must stay ordered");
            let end = u32::from(pair[0].addr) as u64 + pair[0].size();
            assert!(
                end <= u32::from(pair[1].addr) as u64,
                "Output blocks must not overlap"
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let input = cidrs(&[
            "10.0.0.0/25",
            "10.0.0.128/25",
            "10.0.1.0/24",
            "55.2.0.0/15",
            "55.4.0.0/16",
        ]);
        let once = consolidate(&input).expect("Error consolidating");
        let twice = consolidate(&once).expect("Error consolidating");
        assert_eq!(once, twice, "Consolidation must be idempotent");
    }
}
