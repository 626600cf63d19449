//! Provider error types.

use alloy_primitives::B256;
use alloy_transport::{RpcError, TransportErrorKind};
use makai_protocol::ChallengeError;
use std::time::Duration;

/// An error produced by a collaborator client.
///
/// Everything I/O-shaped here is transient: the poll loop retries it on the next tick.
/// The single non-transient case is on-chain data that failed domain validation, which
/// no amount of retrying will fix.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A contract call failed.
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),
    /// A raw RPC request failed.
    #[error(transparent)]
    Transport(#[from] RpcError<TransportErrorKind>),
    /// A submitted transaction produced no receipt.
    #[error(transparent)]
    PendingTransaction(#[from] alloy_provider::PendingTransactionError),
    /// A network call exceeded its configured deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The rollup node has not derived the requested block yet.
    #[error("output at block {0} not available from the rollup node")]
    NotAvailable(u64),
    /// The prover could not produce an artifact for the given destination block.
    #[error("proof unavailable for block {number} ({hash}): {message}")]
    ProofUnavailable {
        /// The destination block number the proof was requested for.
        number: u64,
        /// The destination block hash the proof was requested for.
        hash: B256,
        /// The underlying failure.
        message: String,
    },
    /// A submitted transaction was confirmed but reverted.
    #[error("transaction {0} reverted")]
    Reverted(B256),
    /// On-chain data failed validation into the engine's domain types.
    #[error(transparent)]
    InvalidChallengeData(#[from] ChallengeError),
}

impl ProviderError {
    /// Whether retrying on a later tick can plausibly succeed.
    pub const fn is_transient(&self) -> bool {
        !matches!(self, Self::InvalidChallengeData(_))
    }
}
