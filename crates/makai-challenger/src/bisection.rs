//! Segment sampling and fault position selection.

use crate::ChallengerError;
use alloy_primitives::B256;
use makai_protocol::{OutputCommitment, Segments, SegmentsError};
use makai_providers::{DisputeOracle, OutputSource};

/// The bisection turn a challenge is created at.
pub const FIRST_TURN: u8 = 1;

/// Samples the local chain's commitments over `[start, start + size]` with the section
/// count the dispute contract prescribes for `turn`.
///
/// Every sampled block must resolve: an incomplete array would commit this validator
/// to hashes it never computed, so an unavailable block aborts with the source's error
/// instead of being skipped.
pub async fn build_segments<O, S>(
    oracle: &O,
    source: &S,
    turn: u8,
    start: u64,
    size: u64,
) -> Result<Segments, ChallengerError>
where
    O: DisputeOracle,
    S: OutputSource,
{
    if size == 0 {
        return Err(SegmentsError::EmptyRange.into());
    }
    if start.checked_add(size).is_none() {
        return Err(SegmentsError::RangeOverflow { start, size }.into());
    }
    let sections = oracle.sections_for_turn(turn).await?;
    if sections == 0 {
        return Err(ChallengerError::ZeroSections { turn });
    }
    if size % sections != 0 {
        return Err(SegmentsError::UnevenSections { size, sections }.into());
    }

    let step = size / sections;
    let mut hashes = Vec::with_capacity(sections as usize + 1);
    for i in 0..=sections {
        hashes.push(commitment_at(source, start + i * step).await?);
    }
    debug!(target: "challenger", turn, start, size, sections, "Sampled segments");
    Ok(Segments::new(start, size, hashes)?)
}

/// Walks the counterparty's sampled points left to right and returns the last index on
/// which the local chain still agrees.
///
/// The first divergence at point `j` places the fault inside the sub-interval that
/// starts at point `j - 1`. Divergence at point 0 cannot legitimately happen, since
/// the previous round fixed that endpoint by agreement of both parties; no divergence
/// at all means the dispute contradicts the local chain entirely. Both are protocol
/// violations.
pub async fn select_fault_position<S: OutputSource>(
    source: &S,
    segments: &Segments,
) -> Result<u64, ChallengerError> {
    for (index, (number, hash)) in
        segments.block_numbers().zip(segments.hashes().iter()).enumerate()
    {
        let local = commitment_at(source, number).await?;
        if local != *hash {
            if index == 0 {
                return Err(ChallengerError::DivergenceAtRangeStart { block: number });
            }
            return Ok(index as u64 - 1);
        }
    }
    Err(ChallengerError::NoFaultFound)
}

/// Returns the local commitment at `number`.
///
/// Block 0 commits to the zero value without a query: the genesis output predates the
/// dispute protocol.
async fn commitment_at<S: OutputSource>(
    source: &S,
    number: u64,
) -> Result<OutputCommitment, ChallengerError> {
    if number == 0 {
        return Ok(B256::ZERO);
    }
    Ok(source.output_at(number, false).await?.output_root)
}
