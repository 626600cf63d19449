//! The output commitment model.
//!
//! An output commitment (or output root) is a versioned keccak hash summarizing L2
//! state at a block. It is the unit of agreement between the parties of a challenge:
//! the asserter submits commitments to the dispute contract, the challenger recomputes
//! them from its own rollup node, and every comparison made during bisection is a
//! comparison of commitments. The hash construction must therefore be byte-exact with
//! the on-chain verifier; a single differing byte desynchronizes every later round.

use crate::{BlockRef, L2BlockRef};
use alloy_consensus::Header;
use alloy_primitives::{keccak256, B256, Bytes};

/// An output commitment: a versioned hash summarizing L2 state at a block.
pub type OutputCommitment = B256;

/// The V0 output root version: the commitment covers the state root, the withdrawal
/// storage root and the block hash.
pub const OUTPUT_ROOT_VERSION_V0: B256 = B256::ZERO;

/// The V1 output root version: V0 plus the hash of the next block, which is what the
/// fault proof binds to.
pub const OUTPUT_ROOT_VERSION_V1: B256 = B256::with_last_byte(1);

/// An error produced while computing or verifying an output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OutputRootError {
    /// The proof carries a version this implementation does not know how to hash.
    #[error("unsupported output root version: {0}")]
    UnsupportedVersion(B256),
    /// The recomputed output root differs from the one the source reported.
    #[error("output root mismatch: computed {computed}, reported {reported}")]
    RootMismatch {
        /// The locally recomputed output root.
        computed: B256,
        /// The output root reported by the source.
        reported: B256,
    },
}

/// The preimage of an output commitment.
///
/// Submitted on chain alongside a fault proof so the verifier can open the commitment
/// at both endpoints of the disputed block transition.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputRootProof {
    /// The commitment version.
    pub version: B256,
    /// The L2 state root at the committed block.
    pub state_root: B256,
    /// The storage root of the withdrawal message passer at the committed block.
    pub withdrawal_storage_root: B256,
    /// The hash of the committed block.
    pub block_hash: B256,
    /// The hash of the block after the committed block. Only hashed for V1.
    pub next_block_hash: B256,
}

impl OutputRootProof {
    /// Computes the output commitment for this proof.
    ///
    /// V0 hashes `version ‖ state_root ‖ withdrawal_storage_root ‖ block_hash`, V1
    /// appends `next_block_hash`. Unknown versions are rejected rather than hashed
    /// with a guessed layout.
    pub fn output_root(&self) -> Result<OutputCommitment, OutputRootError> {
        let mut preimage = [0u8; 160];
        preimage[..32].copy_from_slice(self.version.as_slice());
        preimage[32..64].copy_from_slice(self.state_root.as_slice());
        preimage[64..96].copy_from_slice(self.withdrawal_storage_root.as_slice());
        preimage[96..128].copy_from_slice(self.block_hash.as_slice());
        preimage[128..].copy_from_slice(self.next_block_hash.as_slice());

        if self.version == OUTPUT_ROOT_VERSION_V0 {
            Ok(keccak256(&preimage[..128]))
        } else if self.version == OUTPUT_ROOT_VERSION_V1 {
            Ok(keccak256(preimage))
        } else {
            Err(OutputRootError::UnsupportedVersion(self.version))
        }
    }
}

/// L1 head blocks observed by the rollup node when a snapshot was produced.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct L1Status {
    /// The current L1 head.
    pub current: BlockRef,
    /// The safe L1 block.
    pub safe: BlockRef,
    /// The finalized L1 block.
    pub finalized: BlockRef,
}

/// A locally recomputed view of what the output commitment at an L2 block should be.
///
/// Produced on demand by the rollup node, never persisted. The extended next-block
/// fields carry the data a fault proof needs beyond the commitment itself: the next
/// block's header (whose hash the V1 commitment incorporates) and its raw EIP-2718
/// transactions. They are only populated when explicitly requested.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputSnapshot {
    /// The commitment version the source hashed with.
    pub version: B256,
    /// The output commitment at [`Self::block_ref`].
    pub output_root: OutputCommitment,
    /// The committed L2 block.
    pub block_ref: L2BlockRef,
    /// The block after the committed block.
    pub next_block_ref: L2BlockRef,
    /// The L2 state root at the committed block.
    pub state_root: B256,
    /// The withdrawal message passer storage root at the committed block.
    pub withdrawal_storage_root: B256,
    /// The L1 blocks the rollup node had observed when this snapshot was produced.
    pub l1_status: L1Status,
    /// The next block's header, when extended fields were requested.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub next_block_header: Option<Header>,
    /// The next block's raw EIP-2718 transactions, when extended fields were requested.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub next_block_transactions: Option<Vec<Bytes>>,
}

impl OutputSnapshot {
    /// Assembles the [OutputRootProof] opening this snapshot's commitment.
    pub fn output_root_proof(&self) -> OutputRootProof {
        OutputRootProof {
            version: self.version,
            state_root: self.state_root,
            withdrawal_storage_root: self.withdrawal_storage_root,
            block_hash: self.block_ref.hash(),
            next_block_hash: self.next_block_ref.hash(),
        }
    }

    /// Recomputes the output root from the snapshot fields and checks it against the
    /// root the source reported.
    ///
    /// A mismatch means the source and this implementation disagree on the commitment
    /// scheme itself, which would silently desynchronize every segment comparison.
    pub fn verify_output_root(&self) -> Result<(), OutputRootError> {
        let computed = self.output_root_proof().output_root()?;
        if computed != self.output_root {
            return Err(OutputRootError::RootMismatch { computed, reported: self.output_root });
        }
        Ok(())
    }
}

/// A suspect interval between two submitted output commitments.
///
/// `end_block - start_block` is always the protocol-fixed submission interval: the
/// output at `output_index` commits to `end_block`, the previous output to
/// `start_block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputRange {
    /// The index of the disputed output.
    pub output_index: u64,
    /// The first block of the suspect interval, committed by the previous output.
    pub start_block: u64,
    /// The last block of the suspect interval, committed by the disputed output.
    pub end_block: u64,
}

impl OutputRange {
    /// Instantiates a new [OutputRange].
    pub const fn new(output_index: u64, start_block: u64, end_block: u64) -> Self {
        Self { output_index, start_block, end_block }
    }

    /// Returns the size of the interval in blocks.
    pub const fn size(&self) -> u64 {
        self.end_block - self.start_block
    }
}

impl core::fmt::Display for OutputRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "OutputRange {{ output_index: {}, start_block: {}, end_block: {} }}",
            self.output_index, self.start_block, self.end_block
        )
    }
}
