//! Validator configuration arguments.

use alloy_primitives::{Address, B256};
use clap::Args;
use makai_challenger::{ConfigError, Role};
use url::Url;

/// Validator configuration arguments.
#[derive(Args, Clone, Debug)]
pub(crate) struct ValidatorArgs {
    /// L1 execution layer RPC, used for dispute contract reads and transaction
    /// submission.
    #[arg(long, env = "MAKAI_L1_ETH_RPC")]
    pub l1_eth_rpc: Url,

    /// Local rollup node RPC serving the output-at-block API.
    #[arg(long, env = "MAKAI_ROLLUP_RPC")]
    pub rollup_rpc: Url,

    /// ZK fault proof service RPC.
    #[arg(long, env = "MAKAI_PROVER_RPC")]
    pub prover_rpc: Url,

    /// Address of the dispute contract on L1.
    #[arg(long, env = "MAKAI_DISPUTE_CONTRACT")]
    pub dispute_contract: Address,

    /// Private key of the validator wallet.
    #[arg(long, env = "MAKAI_SIGNER_KEY")]
    pub signer_key: B256,

    /// The L2 chain ID, bound into fault proof public inputs.
    #[arg(long, env = "MAKAI_L2_CHAIN_ID")]
    pub l2_chain_id: u64,

    /// Act as challenger: scan submitted outputs and dispute invalid ones.
    #[arg(long, env = "MAKAI_CHALLENGER")]
    pub challenger: bool,

    /// Act as asserter: defend own submitted outputs against challenges.
    #[arg(long, env = "MAKAI_ASSERTER")]
    pub asserter: bool,

    /// Seconds between engine ticks.
    #[arg(long, default_value = "12", env = "MAKAI_POLL_INTERVAL")]
    pub poll_interval: u64,

    /// Timeout in seconds for L1 and rollup node calls.
    #[arg(long, default_value = "10", env = "MAKAI_RPC_TIMEOUT")]
    pub rpc_timeout: u64,

    /// Timeout in seconds for proof fetches, which may block while a proof is
    /// generated.
    #[arg(long, default_value = "3600", env = "MAKAI_PROVER_TIMEOUT")]
    pub prover_timeout: u64,
}

impl ValidatorArgs {
    /// Maps the role flags to a [`Role`], rejecting a configuration with neither.
    pub(crate) const fn role(&self) -> Result<Role, ConfigError> {
        Role::from_flags(self.asserter, self.challenger)
    }
}
