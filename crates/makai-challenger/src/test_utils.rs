//! Shared mock collaborators for engine tests.

use alloy_eips::BlockNumHash;
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use makai_protocol::{BlockRef, Challenge, ChallengeStatus, L2BlockRef, OutputSnapshot};
use makai_providers::{
    DisputeOracle, OutputSource, ProofAndPair, Prover, ProviderError, SubmittedOutput,
};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

/// The dispute contract address reported by [MockOracle].
pub(crate) const CONTRACT: Address = Address::with_last_byte(0x7b);

/// A scripted [DisputeOracle] recording every output query.
#[derive(Debug)]
pub(crate) struct MockOracle {
    pub(crate) next_output_index: u64,
    pub(crate) outputs: BTreeMap<u64, SubmittedOutput>,
    pub(crate) submission_interval: u64,
    pub(crate) finalization_period: u64,
    pub(crate) in_progress: bool,
    pub(crate) related: bool,
    pub(crate) status: ChallengeStatus,
    pub(crate) challenge: Option<Challenge>,
    pub(crate) sections: u64,
    pub(crate) output_queries: Mutex<Vec<u64>>,
    pub(crate) sections_queries: Mutex<Vec<u8>>,
}

impl Default for MockOracle {
    fn default() -> Self {
        Self {
            next_output_index: 0,
            outputs: BTreeMap::new(),
            submission_interval: 100,
            finalization_period: 10000,
            in_progress: false,
            related: false,
            status: ChallengeStatus::NoChallenge,
            challenge: None,
            sections: 4,
            output_queries: Mutex::new(Vec::new()),
            sections_queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DisputeOracle for MockOracle {
    fn address(&self) -> Address {
        CONTRACT
    }

    async fn next_output_index(&self) -> Result<u64, ProviderError> {
        Ok(self.next_output_index)
    }

    async fn output_at(&self, index: u64) -> Result<SubmittedOutput, ProviderError> {
        self.output_queries.lock().unwrap().push(index);
        self.outputs.get(&index).copied().ok_or(ProviderError::NotAvailable(index))
    }

    async fn submission_interval(&self) -> Result<u64, ProviderError> {
        Ok(self.submission_interval)
    }

    async fn finalization_period(&self) -> Result<u64, ProviderError> {
        Ok(self.finalization_period)
    }

    async fn is_challenge_in_progress(&self) -> Result<bool, ProviderError> {
        Ok(self.in_progress)
    }

    async fn is_related(&self, _address: Address) -> Result<bool, ProviderError> {
        Ok(self.related)
    }

    async fn status_in_progress(&self) -> Result<ChallengeStatus, ProviderError> {
        Ok(self.status)
    }

    async fn challenge_in_progress(&self) -> Result<Challenge, ProviderError> {
        Ok(self.challenge.clone().expect("mock challenge not set"))
    }

    async fn sections_for_turn(&self, turn: u8) -> Result<u64, ProviderError> {
        self.sections_queries.lock().unwrap().push(turn);
        Ok(self.sections)
    }
}

/// A scripted [OutputSource] serving snapshots by block number and recording every
/// query together with its extended-fields flag.
#[derive(Debug, Default)]
pub(crate) struct MockSource {
    pub(crate) snapshots: BTreeMap<u64, OutputSnapshot>,
    pub(crate) queries: Mutex<Vec<(u64, bool)>>,
}

#[async_trait]
impl OutputSource for MockSource {
    async fn output_at(
        &self,
        block_number: u64,
        include_next_block: bool,
    ) -> Result<OutputSnapshot, ProviderError> {
        self.queries.lock().unwrap().push((block_number, include_next_block));
        self.snapshots.get(&block_number).cloned().ok_or(ProviderError::NotAvailable(block_number))
    }
}

/// A [Prover] returning a fixed artifact, or unavailability when none is set.
#[derive(Debug, Default)]
pub(crate) struct MockProver {
    pub(crate) artifact: Option<ProofAndPair>,
    pub(crate) closed: Arc<Mutex<bool>>,
}

#[async_trait]
impl Prover for MockProver {
    async fn fetch_proof_and_pair(
        &self,
        block_ref: &L2BlockRef,
    ) -> Result<ProofAndPair, ProviderError> {
        self.artifact.clone().ok_or_else(|| ProviderError::ProofUnavailable {
            number: block_ref.number(),
            hash: block_ref.hash(),
            message: "artifact not ready".to_string(),
        })
    }

    async fn close(&self) {
        *self.closed.lock().unwrap() = true;
    }
}

/// A block reference whose hash is derived from its number.
pub(crate) fn l2_block_ref(number: u64) -> L2BlockRef {
    let hash = B256::from(U256::from(number));
    let parent_hash = B256::from(U256::from(number.saturating_sub(1)));
    L2BlockRef::new(
        BlockRef::new(hash, number, parent_hash, 1_700_000_000 + number * 2),
        BlockNumHash { hash: B256::with_last_byte(0x1a), number: number / 10 },
        number % 10,
    )
}

/// A minimal snapshot at `number` reporting `root`, without extended fields.
pub(crate) fn snapshot(number: u64, root: B256) -> OutputSnapshot {
    OutputSnapshot {
        output_root: root,
        block_ref: l2_block_ref(number),
        next_block_ref: l2_block_ref(number + 1),
        ..Default::default()
    }
}
