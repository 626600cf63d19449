//! [Prover] implementation over the prover service RPC.

use crate::{ProofAndPair, Prover, ProviderError};
use alloy_rpc_client::ReqwestClient;
use async_trait::async_trait;
use makai_protocol::L2BlockRef;
use std::time::Duration;
use url::Url;

/// The prover method computing the proof artifact for a block transition.
const FETCH_PROOF_METHOD: &str = "prover_fetchProofAndPair";

/// A [Prover] that requests proof artifacts from an external prover service over HTTP.
///
/// Proof generation takes minutes, so requests carry their own generous timeout rather
/// than the short one the chain clients use. Any failure is reported as
/// [ProviderError::ProofUnavailable]; the caller retries on a later tick since an
/// unfinished proof and an unreachable prover call for the same reaction.
#[derive(Debug, Clone)]
pub struct RpcProver {
    /// The underlying RPC client.
    client: ReqwestClient,
    /// The per-request timeout.
    timeout: Duration,
}

impl RpcProver {
    /// Creates a new [RpcProver] against `prover_rpc`.
    pub fn new_http(prover_rpc: Url, timeout: Duration) -> Self {
        Self { client: ReqwestClient::new_http(prover_rpc), timeout }
    }
}

#[async_trait]
impl Prover for RpcProver {
    async fn fetch_proof_and_pair(
        &self,
        block_ref: &L2BlockRef,
    ) -> Result<ProofAndPair, ProviderError> {
        debug!(target: "prover", number = block_ref.number(), "Requesting fault proof artifact");
        let request = self.client.request(FETCH_PROOF_METHOD, (block_ref.hash(),));
        let message = match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(artifact)) => return Ok(artifact),
            Ok(Err(err)) => err.to_string(),
            Err(_) => format!("no response within {:?}", self.timeout),
        };
        Err(ProviderError::ProofUnavailable {
            number: block_ref.number(),
            hash: block_ref.hash(),
            message,
        })
    }

    async fn close(&self) {
        debug!(target: "prover", "Prover session closed");
    }
}
