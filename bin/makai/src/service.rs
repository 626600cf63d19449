//! The validator service loop.

use crate::{flags::ValidatorArgs, sender::WalletTransactionSender};
use alloy_network::EthereumWallet;
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use makai_challenger::{Challenger, ChallengerConfig, ChallengerError, ErrorSeverity, Metrics};
use makai_providers::{
    DisputeOracle, OutputSource, Prover, RollupOutputClient, RpcProver, TransactionSender,
    TribunalContract,
};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Builds the collaborator clients from `args` and runs the service until Ctrl-C.
pub(crate) async fn run(args: ValidatorArgs) -> Result<()> {
    let role = args.role()?;
    let rpc_timeout = Duration::from_secs(args.rpc_timeout);

    let signer = PrivateKeySigner::from_bytes(&args.signer_key).context("invalid signer key")?;
    let address = signer.address();
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(args.l1_eth_rpc.clone());
    let sender = WalletTransactionSender::new(provider, address);

    let oracle = TribunalContract::new_http(args.dispute_contract, args.l1_eth_rpc, rpc_timeout);
    let source = RollupOutputClient::new_http(args.rollup_rpc, rpc_timeout);
    let prover = RpcProver::new_http(args.prover_rpc, Duration::from_secs(args.prover_timeout));

    let config = ChallengerConfig::new(role, args.l2_chain_id, sender.address());
    let challenger = Challenger::init(oracle, source, prover, config).await?;

    let cancellation = CancellationToken::new();
    let signal_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!(target: "validator_service", "Shutdown signal received");
            signal_token.cancel();
        }
    });

    let service = ValidatorService::new(
        challenger,
        sender,
        Duration::from_secs(args.poll_interval),
        cancellation,
    );
    service.run().await;
    Ok(())
}

/// The poll loop around the challenge engine.
#[derive(Debug)]
struct ValidatorService<O, S, P, T> {
    challenger: Challenger<O, S, P>,
    sender: T,
    poll_interval: Duration,
    cancellation: CancellationToken,
}

impl<O, S, P, T> ValidatorService<O, S, P, T>
where
    O: DisputeOracle,
    S: OutputSource,
    P: Prover,
    T: TransactionSender,
{
    const fn new(
        challenger: Challenger<O, S, P>,
        sender: T,
        poll_interval: Duration,
        cancellation: CancellationToken,
    ) -> Self {
        Self { challenger, sender, poll_interval, cancellation }
    }

    /// Runs one engine tick per poll interval until cancelled.
    ///
    /// Cancellation is observed between ticks only: a tick that has started runs to
    /// completion, so a send already in flight confirms and a transaction is never
    /// built from reads that straddle shutdown.
    async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            target: "validator_service",
            interval_secs = self.poll_interval.as_secs(),
            "Validator service started"
        );

        let cancellation = self.cancellation.clone();
        loop {
            tokio::select! {
                _ = cancellation.cancelled() => break,
                _ = ticker.tick() => self.tick().await,
            }
        }

        self.challenger.shutdown().await;
        info!(target: "validator_service", "Validator service stopped");
    }

    async fn tick(&mut self) {
        let candidate = match self.challenger.determine_challenge_tx().await {
            Ok(candidate) => candidate,
            Err(err) => return report_tick_error(&err),
        };
        let Some(candidate) = candidate else { return };

        debug!(
            target: "validator_service",
            to = %candidate.to,
            calldata_bytes = candidate.data.len(),
            "Submitting challenge transaction"
        );
        match self.sender.send(candidate).await {
            Ok(tx_hash) => {
                info!(target: "validator_service", %tx_hash, "Challenge transaction landed");
            }
            Err(err) => report_tick_error(&err.into()),
        }
    }
}

/// Logs and counts a failed tick by severity.
///
/// The loop never stops on a tick error. Transient failures resolve themselves on a
/// later tick; fatal ones mean invalid protocol data and stay visible at error level
/// while the loop keeps polling, so an operator can intervene.
fn report_tick_error(err: &ChallengerError) {
    let severity = err.severity();
    Metrics::record_tick_error(severity);
    match severity {
        ErrorSeverity::Transient => {
            warn!(target: "validator_service", %err, "Tick aborted, retrying on the next interval");
        }
        ErrorSeverity::Fatal => {
            error!(target: "validator_service", %err, "Tick failed on invalid protocol data");
        }
    }
}
