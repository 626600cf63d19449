//! [DisputeOracle] implementation backed by the on-chain dispute contract.

use crate::{
    bindings::{self, ITribunal, ITribunal::ITribunalInstance},
    DisputeOracle, ProviderError, SubmittedOutput,
};
use alloy_primitives::{Address, U256};
use alloy_provider::RootProvider;
use async_trait::async_trait;
use makai_protocol::{Challenge, ChallengeError, ChallengeStatus};
use std::{future::IntoFuture, time::Duration};
use tracing::trace;
use url::Url;

/// A read-only view over the dispute contract.
///
/// Every call is bounded by a per-request timeout so a stalled L1 endpoint surfaces as a
/// transient [ProviderError::Timeout] instead of wedging the poll loop.
#[derive(Debug)]
pub struct TribunalContract {
    /// The generated contract instance.
    inner: ITribunalInstance<RootProvider>,
    /// The per-request timeout.
    timeout: Duration,
}

impl TribunalContract {
    /// Creates a new [TribunalContract] at `address`, reading through an HTTP provider on
    /// `l1_rpc`.
    pub fn new_http(address: Address, l1_rpc: Url, timeout: Duration) -> Self {
        let provider = RootProvider::new_http(l1_rpc);
        Self { inner: ITribunal::new(address, provider), timeout }
    }

    /// Drives `call` to completion within the configured timeout.
    async fn bounded<T>(
        &self,
        call: impl IntoFuture<Output = Result<T, alloy_contract::Error>>,
    ) -> Result<T, ProviderError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl DisputeOracle for TribunalContract {
    fn address(&self) -> Address {
        *self.inner.address()
    }

    async fn next_output_index(&self) -> Result<u64, ProviderError> {
        let index = self.bounded(self.inner.nextOutputIndex().call()).await?;
        cast_u64("nextOutputIndex", index)
    }

    async fn output_at(&self, index: u64) -> Result<SubmittedOutput, ProviderError> {
        let proposal = self.bounded(self.inner.outputAt(U256::from(index)).call()).await?;
        Ok(SubmittedOutput {
            output_root: proposal.outputRoot,
            l2_block_number: cast_u64("l2BlockNumber", proposal.l2BlockNumber)?,
        })
    }

    async fn submission_interval(&self) -> Result<u64, ProviderError> {
        let interval = self.bounded(self.inner.submissionInterval().call()).await?;
        cast_u64("submissionInterval", interval)
    }

    async fn finalization_period(&self) -> Result<u64, ProviderError> {
        let period = self.bounded(self.inner.finalizationPeriod().call()).await?;
        cast_u64("finalizationPeriod", period)
    }

    async fn is_challenge_in_progress(&self) -> Result<bool, ProviderError> {
        self.bounded(self.inner.isChallengeInProgress().call()).await
    }

    async fn is_related(&self, address: Address) -> Result<bool, ProviderError> {
        self.bounded(self.inner.isRelated(address).call()).await
    }

    async fn status_in_progress(&self) -> Result<ChallengeStatus, ProviderError> {
        let status = self.bounded(self.inner.statusInProgress().call()).await?;
        Ok(ChallengeStatus::try_from(status)?)
    }

    async fn challenge_in_progress(&self) -> Result<Challenge, ProviderError> {
        let raw = self.bounded(self.inner.challengeInProgress().call()).await?;
        trace!(target: "tribunal", id = %raw.id, turn = raw.turn, "Fetched in-progress challenge");
        Ok(challenge_from_raw(raw)?)
    }

    async fn sections_for_turn(&self, turn: u8) -> Result<u64, ProviderError> {
        let sections = self.bounded(self.inner.sectionsForTurn(turn).call()).await?;
        cast_u64("sectionsForTurn", sections)
    }
}

/// Converts a raw on-chain challenge record into the domain [Challenge], rejecting
/// out-of-range values.
fn challenge_from_raw(raw: bindings::Challenge) -> Result<Challenge, ChallengeError> {
    Challenge::from_parts(
        raw.id,
        raw.outputIndex,
        raw.asserter,
        raw.challenger,
        raw.turn,
        raw.segStart,
        raw.segSize,
        raw.segments,
    )
}

/// Narrows a contract-reported word to `u64`.
fn cast_u64(field: &'static str, value: U256) -> Result<u64, ProviderError> {
    value.try_into().map_err(|_| ChallengeError::ValueOverflow { field, value }.into())
}
