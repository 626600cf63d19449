//! The bisection segments array.
//!
//! Each round of the bisection game exchanges a `Segments` value: `sections + 1`
//! commitments sampled at evenly spaced block numbers spanning the disputed range. On
//! chain this is a flat hash array with implicit structural invariants; here it is a
//! range-checked struct that validates those invariants at construction, so the rest
//! of the engine can rely on them instead of re-deriving index arithmetic. The sampled
//! block numbers are not stored: they are fully determined by `(start, size, sections)`
//! and derived on demand, which makes the ordering invariant hold by construction.

use alloy_primitives::B256;

/// An error produced while constructing or subdividing [Segments].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SegmentsError {
    /// The hash array has fewer than two entries, so it spans no sub-interval at all.
    #[error("segments need at least two hashes, got {0}")]
    TooFewHashes(usize),
    /// The covered range is empty.
    #[error("segments cover an empty block range")]
    EmptyRange,
    /// The range size is not divisible by the number of sub-intervals.
    #[error("range of {size} blocks cannot be split into {sections} even sections")]
    UnevenSections {
        /// The size of the covered range in blocks.
        size: u64,
        /// The number of sub-intervals the hash array implies.
        sections: u64,
    },
    /// The range end overflows a block number.
    #[error("segment range {start}+{size} overflows")]
    RangeOverflow {
        /// The first block of the range.
        start: u64,
        /// The size of the range in blocks.
        size: u64,
    },
    /// A sub-interval index beyond the last section was requested.
    #[error("segment position {position} out of range: {sections} sections")]
    PositionOutOfRange {
        /// The requested sub-interval index.
        position: u64,
        /// The number of sub-intervals available.
        sections: u64,
    },
}

/// The commitments one party sampled over a disputed block range.
///
/// `hashes[i]` is the party's output commitment at block `start + i * step`, where
/// `step = size / sections` and `sections = hashes.len() - 1`. The first sampled block
/// is `start`, the last is exactly `start + size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments {
    /// The first block of the covered range.
    start: u64,
    /// The size of the covered range in blocks.
    size: u64,
    /// The sampled commitments, one per section boundary.
    hashes: Vec<B256>,
}

impl Segments {
    /// Validates and instantiates a new [Segments].
    ///
    /// The range must be non-empty, must not overflow, and must split evenly into
    /// `hashes.len() - 1` sections of at least one block each. Values read from the
    /// dispute contract go through this constructor, so a counterparty cannot smuggle
    /// in an array whose implied block numbers are unordered or out of range.
    pub fn new(start: u64, size: u64, hashes: Vec<B256>) -> Result<Self, SegmentsError> {
        if hashes.len() < 2 {
            return Err(SegmentsError::TooFewHashes(hashes.len()));
        }
        if size == 0 {
            return Err(SegmentsError::EmptyRange);
        }
        if start.checked_add(size).is_none() {
            return Err(SegmentsError::RangeOverflow { start, size });
        }
        let sections = (hashes.len() - 1) as u64;
        if size % sections != 0 {
            return Err(SegmentsError::UnevenSections { size, sections });
        }
        Ok(Self { start, size, hashes })
    }

    /// Returns the first block of the covered range.
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Returns the size of the covered range in blocks.
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the number of sub-intervals the range is split into.
    pub fn sections(&self) -> u64 {
        (self.hashes.len() - 1) as u64
    }

    /// Returns the size of one sub-interval in blocks.
    pub fn step(&self) -> u64 {
        self.size / self.sections()
    }

    /// Returns the sampled commitments.
    pub fn hashes(&self) -> &[B256] {
        &self.hashes
    }

    /// Consumes the segments, returning the sampled commitments.
    pub fn into_hashes(self) -> Vec<B256> {
        self.hashes
    }

    /// Returns the block number sampled at `index`, or `None` past the last boundary.
    pub fn block_number_at(&self, index: u64) -> Option<u64> {
        (index <= self.sections()).then(|| self.start + index * self.step())
    }

    /// Returns the sampled block numbers, in order.
    pub fn block_numbers(&self) -> impl Iterator<Item = u64> + '_ {
        let step = self.step();
        (0..=self.sections()).map(move |i| self.start + i * step)
    }

    /// Returns the `(start, size)` of the sub-interval at `position`, the range the
    /// next bisection round subdivides.
    ///
    /// The returned size is one step of this round, so it strictly decreases round
    /// over round whenever there is more than one section.
    pub fn next_segments_range(&self, position: u64) -> Result<(u64, u64), SegmentsError> {
        let sections = self.sections();
        if position >= sections {
            return Err(SegmentsError::PositionOutOfRange { position, sections });
        }
        let step = self.step();
        Ok((self.start + position * step, step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashes(n: usize) -> Vec<B256> {
        (0..n).map(|i| B256::with_last_byte(i as u8)).collect()
    }

    #[test]
    fn test_new_rejects_short_hash_arrays() {
        assert_eq!(Segments::new(0, 100, vec![]).unwrap_err(), SegmentsError::TooFewHashes(0));
        assert_eq!(Segments::new(0, 100, hashes(1)).unwrap_err(), SegmentsError::TooFewHashes(1));
    }

    #[test]
    fn test_new_rejects_empty_range() {
        assert_eq!(Segments::new(10, 0, hashes(3)).unwrap_err(), SegmentsError::EmptyRange);
    }

    #[test]
    fn test_new_rejects_uneven_sections() {
        assert_eq!(
            Segments::new(0, 100, hashes(4)).unwrap_err(),
            SegmentsError::UnevenSections { size: 100, sections: 3 }
        );
    }

    #[test]
    fn test_new_rejects_overflowing_range() {
        assert_eq!(
            Segments::new(u64::MAX - 10, 100, hashes(5)).unwrap_err(),
            SegmentsError::RangeOverflow { start: u64::MAX - 10, size: 100 }
        );
    }

    #[test]
    fn test_block_numbers_span_range() {
        let segments = Segments::new(900, 100, hashes(5)).unwrap();
        let numbers: Vec<u64> = segments.block_numbers().collect();
        assert_eq!(numbers, vec![900, 925, 950, 975, 1000]);
        assert_eq!(numbers.len() as u64, segments.sections() + 1);
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(segments.block_number_at(0), Some(900));
        assert_eq!(segments.block_number_at(4), Some(1000));
        assert_eq!(segments.block_number_at(5), None);
    }

    #[test]
    fn test_next_segments_range_contained() {
        let segments = Segments::new(900, 100, hashes(5)).unwrap();
        let (start, size) = segments.next_segments_range(2).unwrap();
        assert_eq!((start, size), (950, 25));
        assert!(start >= segments.start());
        assert!(start + size <= segments.start() + segments.size());
        assert!(size < segments.size());
    }

    #[test]
    fn test_next_segments_range_position_bounds() {
        let segments = Segments::new(900, 100, hashes(5)).unwrap();
        assert!(segments.next_segments_range(3).is_ok());
        assert_eq!(
            segments.next_segments_range(4).unwrap_err(),
            SegmentsError::PositionOutOfRange { position: 4, sections: 4 }
        );
    }

    #[test]
    fn test_bisection_terminates() {
        // Repeated subdivision with at least two sections per round must drive the
        // range size down to a single step in O(log size) rounds.
        let (mut start, mut size) = (0u64, 4096u64);
        let mut rounds = 0;
        while size > 4 {
            let segments = Segments::new(start, size, hashes(5)).unwrap();
            let (next_start, next_size) = segments.next_segments_range(3).unwrap();
            assert!(next_size < size);
            (start, size) = (next_start, next_size);
            rounds += 1;
        }
        assert_eq!(rounds, 5);
        assert_eq!(size, 4);
    }
}
