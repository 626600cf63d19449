//! On-chain challenge state, as read by the engine.
//!
//! A challenge lives on L1: it is created by one party's transaction, mutated by the
//! dispute contract in response to bisections, timeouts and fault proofs, and only
//! ever *read* here. Since the counterparty controls part of that state, every raw
//! value crosses a validating conversion before the engine touches it.

use crate::{Segments, SegmentsError};
use alloy_primitives::{Address, U256};

/// An error produced while validating on-chain challenge data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChallengeError {
    /// The contract reported a status discriminant this implementation does not know.
    #[error("unknown challenge status: {0}")]
    UnknownStatus(u8),
    /// A challenge field does not fit the engine's integer domain.
    #[error("challenge {field} does not fit in 64 bits: {value}")]
    ValueOverflow {
        /// The name of the offending field.
        field: &'static str,
        /// The raw on-chain value.
        value: U256,
    },
    /// The challenge's segments array violates a structural invariant.
    #[error(transparent)]
    Segments(#[from] SegmentsError),
}

/// The status of the in-progress challenge, as reported by the dispute contract.
///
/// The contract is authoritative: the engine never derives a status locally, it only
/// reacts to the one read on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ChallengeStatus {
    /// No challenge is in progress.
    #[default]
    NoChallenge = 0,
    /// It is the asserter's turn to bisect.
    AsserterTurn = 1,
    /// It is the challenger's turn to bisect.
    ChallengerTurn = 2,
    /// The asserter missed its turn deadline; the challenger may claim the timeout.
    AsserterTimeout = 3,
    /// The challenger missed its turn deadline.
    ChallengerTimeout = 4,
    /// Bisection has narrowed the range to a single block; a fault proof may be
    /// submitted.
    ProveReady = 5,
}

impl TryFrom<u8> for ChallengeStatus {
    type Error = ChallengeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoChallenge),
            1 => Ok(Self::AsserterTurn),
            2 => Ok(Self::ChallengerTurn),
            3 => Ok(Self::AsserterTimeout),
            4 => Ok(Self::ChallengerTimeout),
            5 => Ok(Self::ProveReady),
            _ => Err(ChallengeError::UnknownStatus(value)),
        }
    }
}

impl core::fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let status = match self {
            Self::NoChallenge => "NO_CHALLENGE",
            Self::AsserterTurn => "ASSERTER_TURN",
            Self::ChallengerTurn => "CHALLENGER_TURN",
            Self::AsserterTimeout => "ASSERTER_TIMEOUT",
            Self::ChallengerTimeout => "CHALLENGER_TIMEOUT",
            Self::ProveReady => "PROVE_READY",
        };
        write!(f, "{status}")
    }
}

/// The in-progress challenge over one submitted output.
///
/// `segments` embeds the `(seg_start, seg_size, hashes)` triple the contract stores:
/// the block range the most recent round's hash array subdivides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// The challenge id assigned by the contract.
    pub id: U256,
    /// The index of the disputed output.
    pub output_index: u64,
    /// The party that submitted the disputed output.
    pub asserter: Address,
    /// The party disputing the output.
    pub challenger: Address,
    /// The bisection turn counter. Parity determines whose move it is; the contract
    /// reports the derived status separately.
    pub turn: u8,
    /// The committed hashes of the most recent round and the range they subdivide.
    pub segments: Segments,
}

impl Challenge {
    /// Validates raw on-chain challenge fields into a [Challenge].
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: U256,
        output_index: U256,
        asserter: Address,
        challenger: Address,
        turn: u8,
        seg_start: U256,
        seg_size: U256,
        hashes: Vec<alloy_primitives::B256>,
    ) -> Result<Self, ChallengeError> {
        let output_index = cast_u64("output index", output_index)?;
        let seg_start = cast_u64("segment start", seg_start)?;
        let seg_size = cast_u64("segment size", seg_size)?;
        let segments = Segments::new(seg_start, seg_size, hashes)?;
        Ok(Self { id, output_index, asserter, challenger, turn, segments })
    }
}

fn cast_u64(field: &'static str, value: U256) -> Result<u64, ChallengeError> {
    value.try_into().map_err(|_| ChallengeError::ValueOverflow { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    fn hashes(n: usize) -> Vec<B256> {
        (0..n).map(|i| B256::with_last_byte(i as u8)).collect()
    }

    #[test]
    fn test_status_roundtrip() {
        for raw in 0u8..=5 {
            let status = ChallengeStatus::try_from(raw).unwrap();
            assert_eq!(status as u8, raw);
        }
        assert_eq!(
            ChallengeStatus::try_from(6).unwrap_err(),
            ChallengeError::UnknownStatus(6)
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ChallengeStatus::AsserterTurn.to_string(), "ASSERTER_TURN");
        assert_eq!(ChallengeStatus::ProveReady.to_string(), "PROVE_READY");
    }

    #[test]
    fn test_from_parts() {
        let challenge = Challenge::from_parts(
            U256::from(1),
            U256::from(10),
            Address::with_last_byte(0xaa),
            Address::with_last_byte(0xbb),
            2,
            U256::from(900),
            U256::from(100),
            hashes(5),
        )
        .unwrap();
        assert_eq!(challenge.output_index, 10);
        assert_eq!(challenge.segments.start(), 900);
        assert_eq!(challenge.segments.step(), 25);
    }

    #[test]
    fn test_from_parts_rejects_oversized_fields() {
        let err = Challenge::from_parts(
            U256::from(1),
            U256::MAX,
            Address::ZERO,
            Address::ZERO,
            2,
            U256::from(900),
            U256::from(100),
            hashes(5),
        )
        .unwrap_err();
        assert_eq!(err, ChallengeError::ValueOverflow { field: "output index", value: U256::MAX });
    }

    #[test]
    fn test_from_parts_rejects_malformed_segments() {
        let err = Challenge::from_parts(
            U256::from(1),
            U256::from(10),
            Address::ZERO,
            Address::ZERO,
            2,
            U256::from(900),
            U256::from(100),
            hashes(4),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ChallengeError::Segments(SegmentsError::UnevenSections { size: 100, sections: 3 })
        );
    }
}
