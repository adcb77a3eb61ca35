//! Acknowledgement range validation
//!
//! Scans `SequenceAcknowledgement` blocks in receipt order and stops at the
//! first range whose lower bound is above its upper bound. Later violations
//! are not reported.

use crate::domain::value_objects::{AckBlock, AckRange};

/// First malformed range, with the block that carried it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidRange<'a> {
    pub block_index: usize,
    pub range_index: usize,
    pub block: &'a AckBlock,
    pub range: AckRange,
}

/// Find the first range with `lower > upper`.
pub fn find_first_invalid_range(blocks: &[AckBlock]) -> Option<InvalidRange<'_>> {
    for (block_index, block) in blocks.iter().enumerate() {
        for (range_index, range) in block.ranges.iter().enumerate() {
            if !range.is_valid() {
                return Some(InvalidRange {
                    block_index,
                    range_index,
                    block,
                    range: *range,
                });
            }
        }
    }
    None
}
