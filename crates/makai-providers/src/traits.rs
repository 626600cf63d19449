//! Collaborator interfaces consumed by the challenge engine.

use crate::{ProviderError, TxCandidate};
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use makai_protocol::{Challenge, ChallengeStatus, L2BlockRef, OutputSnapshot};

/// An output submission as recorded by the dispute contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmittedOutput {
    /// The submitted output root.
    pub output_root: B256,
    /// The L2 block the output commits to.
    pub l2_block_number: u64,
}

/// A fault proof artifact produced by the prover.
///
/// The proof system is an external capability; the arrays are carried opaquely into
/// the `proveFault` calldata.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofAndPair {
    /// The proof points.
    pub proof: Vec<U256>,
    /// The pairing data.
    pub pair: Vec<U256>,
}

/// The local recomputation source for output snapshots, usually the operator's own
/// rollup node.
#[async_trait]
pub trait OutputSource {
    /// Returns the [OutputSnapshot] at the given L2 block.
    ///
    /// `include_next_block` requests the extended next-block fields a fault proof
    /// needs. Fails with [ProviderError::NotAvailable] if the node has not derived the
    /// block yet.
    async fn output_at(
        &self,
        block_number: u64,
        include_next_block: bool,
    ) -> Result<OutputSnapshot, ProviderError>;
}

/// Read access to the dispute contract.
#[async_trait]
pub trait DisputeOracle {
    /// Returns the contract address, the target of every emitted transaction.
    fn address(&self) -> Address;

    /// Returns the index the next output submission will take.
    async fn next_output_index(&self) -> Result<u64, ProviderError>;

    /// Returns the submitted output at `index`.
    async fn output_at(&self, index: u64) -> Result<SubmittedOutput, ProviderError>;

    /// Returns the fixed number of L2 blocks between output submissions.
    async fn submission_interval(&self) -> Result<u64, ProviderError>;

    /// Returns the finalization period, after which outputs are no longer disputable.
    async fn finalization_period(&self) -> Result<u64, ProviderError>;

    /// Whether a challenge is currently in progress.
    async fn is_challenge_in_progress(&self) -> Result<bool, ProviderError>;

    /// Whether `address` is a party to the in-progress challenge.
    async fn is_related(&self, address: Address) -> Result<bool, ProviderError>;

    /// Returns the status of the in-progress challenge.
    async fn status_in_progress(&self) -> Result<ChallengeStatus, ProviderError>;

    /// Returns the in-progress [Challenge].
    async fn challenge_in_progress(&self) -> Result<Challenge, ProviderError>;

    /// Returns the number of sub-intervals a segments array must have at `turn`.
    async fn sections_for_turn(&self, turn: u8) -> Result<u64, ProviderError>;
}

/// The external prover capability producing ZK fault proof artifacts.
#[async_trait]
pub trait Prover {
    /// Fetches the proof artifact for the block transition *into* `block_ref`.
    ///
    /// Proof generation is slow; implementations bound this with the dedicated prover
    /// timeout rather than the general network timeout. Failures carry the destination
    /// block identity for diagnosis and are never retried internally.
    async fn fetch_proof_and_pair(
        &self,
        block_ref: &L2BlockRef,
    ) -> Result<ProofAndPair, ProviderError>;

    /// Releases any held connection.
    async fn close(&self);
}

/// The consumer side of transaction management.
///
/// Implementations sign, submit and confirm the candidate; gas escalation and
/// resubmission live entirely behind this interface.
#[async_trait]
pub trait TransactionSender {
    /// Submits `candidate` and resolves with its hash once confirmed.
    async fn send(&self, candidate: TxCandidate) -> Result<B256, ProviderError>;
}
