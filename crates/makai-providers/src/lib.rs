#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

pub mod bindings;

pub mod calldata;
pub use calldata::TxCandidate;

mod error;
pub use error::ProviderError;

mod traits;
pub use traits::{
    DisputeOracle, OutputSource, ProofAndPair, Prover, SubmittedOutput, TransactionSender,
};

mod tribunal;
pub use tribunal::TribunalContract;

mod rollup;
pub use rollup::RollupOutputClient;

mod prover;
pub use prover::RpcProver;
