#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod config;
pub use config::{ChallengerConfig, ConfigError, Role};

mod error;
pub use error::{ChallengerError, ErrorSeverity};

mod machine;
pub use machine::{next_action, Action};

mod scan;
pub use scan::OutputScanner;

mod bisection;
pub use bisection::{build_segments, select_fault_position, FIRST_TURN};

mod fault;
pub use fault::{build_fault_proof, FaultProofInputs};

mod dispatcher;
pub use dispatcher::Challenger;

mod metrics;
pub use metrics::Metrics;

#[cfg(test)]
mod test_utils;
