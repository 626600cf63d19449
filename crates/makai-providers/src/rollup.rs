//! [OutputSource] implementation over the rollup node RPC.

use crate::{OutputSource, ProviderError};
use alloy_rpc_client::ReqwestClient;
use alloy_transport::RpcError;
use async_trait::async_trait;
use makai_protocol::OutputSnapshot;
use std::time::Duration;
use url::Url;

/// The rollup node method serving output snapshots.
const OUTPUT_AT_BLOCK_METHOD: &str = "rollup_outputAtBlock";

/// An [OutputSource] that queries a rollup node over HTTP.
///
/// The node answers `rollup_outputAtBlock` for any block it has derived; a block past its
/// derived head yields an error response, which maps to [ProviderError::NotAvailable] so
/// callers can retry on a later tick.
#[derive(Debug, Clone)]
pub struct RollupOutputClient {
    /// The underlying RPC client.
    client: ReqwestClient,
    /// The per-request timeout.
    timeout: Duration,
}

impl RollupOutputClient {
    /// Creates a new [RollupOutputClient] against `rollup_rpc`.
    pub fn new_http(rollup_rpc: Url, timeout: Duration) -> Self {
        Self { client: ReqwestClient::new_http(rollup_rpc), timeout }
    }
}

#[async_trait]
impl OutputSource for RollupOutputClient {
    async fn output_at(
        &self,
        block_number: u64,
        include_next_block: bool,
    ) -> Result<OutputSnapshot, ProviderError> {
        let request =
            self.client.request(OUTPUT_AT_BLOCK_METHOD, (block_number, include_next_block));
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(snapshot)) => Ok(snapshot),
            Ok(Err(RpcError::ErrorResp(payload))) => {
                debug!(
                    target: "rollup_client",
                    block_number,
                    message = %payload.message,
                    "Output snapshot not served"
                );
                Err(ProviderError::NotAvailable(block_number))
            }
            Ok(Err(err)) => Err(err.into()),
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        }
    }
}
