//! Wallet-backed transaction submission.

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use async_trait::async_trait;
use makai_providers::{ProviderError, TransactionSender, TxCandidate};
use tracing::{debug, info};

/// A [`TransactionSender`] over an alloy wallet provider.
///
/// The provider carries the wallet filler, so candidates only need a target and
/// calldata; nonce, gas and signing are filled on the way out. Confirmation means one
/// receipt, and a reverted receipt is an error.
#[derive(Debug)]
pub(crate) struct WalletTransactionSender<P> {
    provider: P,
    address: Address,
}

impl<P: Provider> WalletTransactionSender<P> {
    /// Creates a sender over `provider`, signing as `address`.
    pub(crate) const fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }

    /// The wallet address transactions are sent from.
    pub(crate) const fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl<P> TransactionSender for WalletTransactionSender<P>
where
    P: Provider + Send + Sync,
{
    async fn send(&self, candidate: TxCandidate) -> Result<B256, ProviderError> {
        let request = TransactionRequest::default()
            .with_from(self.address)
            .with_to(candidate.to)
            .with_input(candidate.data);
        let pending = self.provider.send_transaction(request).await?;
        let tx_hash = *pending.tx_hash();
        debug!(target: "tx_sender", %tx_hash, "Transaction submitted, awaiting receipt");

        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            return Err(ProviderError::Reverted(tx_hash));
        }
        info!(
            target: "tx_sender",
            %tx_hash,
            block = receipt.block_number,
            gas_used = receipt.gas_used,
            "Transaction confirmed"
        );
        Ok(tx_hash)
    }
}
