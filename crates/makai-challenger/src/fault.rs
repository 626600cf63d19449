//! Fault proof input assembly.
//!
//! Everything submitted with `proveFault` is derived here from two snapshots: the last
//! agreed block (the source) and the faulty block (the destination). Every commitment
//! opening and the carried header are verified locally first, since a proof over
//! inconsistent inputs burns a transaction and, worse, the challenge turn.

use crate::ChallengerError;
use alloy_consensus::Header;
use alloy_primitives::{keccak256, Bytes, B256, U256};
use makai_protocol::{L2BlockRef, Segments, SegmentsError};
use makai_providers::{
    bindings::{OutputRootProof, PublicInput},
    OutputSource,
};

/// The locally assembled inputs of a `proveFault` submission, everything except the
/// prover's artifact.
#[derive(Debug, Clone)]
pub struct FaultProofInputs {
    /// The fault position within the final round's segments.
    pub position: u64,
    /// The opened commitment at the last agreed block.
    pub src_proof: OutputRootProof,
    /// The opened commitment at the faulty block.
    pub dst_proof: OutputRootProof,
    /// The public input binding the proof to the faulty block transition.
    pub public_input: PublicInput,
    /// The RLP encoding of the faulty block's header.
    pub header_rlp: Bytes,
    /// The faulty block. The prover artifact is keyed by this reference.
    pub dst_block_ref: L2BlockRef,
}

/// Assembles the fault proof inputs for the disputed transition at `position`.
///
/// Fetches the snapshot at the last agreed block with its extended next-block fields
/// and the snapshot one block after, re-verifies both commitment openings, and checks
/// that the carried header hashes to the next-block hash the source committed to. The
/// public input is scoped to `l2_chain_id`.
pub async fn build_fault_proof<S: OutputSource>(
    source: &S,
    segments: &Segments,
    position: u64,
    l2_chain_id: u64,
) -> Result<FaultProofInputs, ChallengerError> {
    let block_number = segments.block_number_at(position).ok_or(
        SegmentsError::PositionOutOfRange { position, sections: segments.sections() },
    )?;

    let src = source.output_at(block_number, true).await?;
    let dst = source.output_at(block_number + 1, false).await?;
    src.verify_output_root()?;
    dst.verify_output_root()?;

    let header = src
        .next_block_header
        .as_ref()
        .ok_or(ChallengerError::MissingNextBlockData { number: block_number })?;
    let transactions = src
        .next_block_transactions
        .as_ref()
        .ok_or(ChallengerError::MissingNextBlockData { number: block_number })?;

    let block_hash = header.hash_slow();
    if block_hash != src.next_block_ref.hash() {
        return Err(ChallengerError::HeaderHashMismatch {
            computed: block_hash,
            expected: src.next_block_ref.hash(),
        });
    }

    let public_input = public_input_from(header, transactions, block_hash, l2_chain_id);
    let header_rlp: Bytes = alloy_rlp::encode(header).into();

    debug!(
        target: "fault_prover",
        position,
        block = header.number,
        txs = transactions.len(),
        "Assembled fault proof inputs"
    );

    Ok(FaultProofInputs {
        position,
        src_proof: src.output_root_proof().into(),
        dst_proof: dst.output_root_proof().into(),
        public_input,
        header_rlp,
        dst_block_ref: dst.block_ref,
    })
}

/// Derives the ZK public input from the faulty block's header and raw transactions.
fn public_input_from(
    header: &Header,
    transactions: &[Bytes],
    block_hash: B256,
    l2_chain_id: u64,
) -> PublicInput {
    PublicInput {
        chainId: U256::from(l2_chain_id),
        parentHash: header.parent_hash,
        blockNumber: header.number,
        timestamp: header.timestamp,
        stateRoot: header.state_root,
        blockHash: block_hash,
        txHashes: transactions.iter().map(keccak256).collect(),
    }
}
