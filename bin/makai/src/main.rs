#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use anyhow::Result;
use clap::{ArgAction, Parser};

mod flags;
mod sender;
mod service;
mod telemetry;

/// The CLI arguments.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct MakaiArgs {
    /// Verbosity level (0-2)
    #[arg(long, short, action = ArgAction::Count)]
    pub v: u8,
    /// A port to serve prometheus metrics on.
    #[arg(long, default_value = "9090", env = "MAKAI_METRICS_PORT")]
    pub metrics_port: u16,
    /// Validator arguments.
    #[clap(flatten)]
    pub validator: flags::ValidatorArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse arguments.
    let args = MakaiArgs::parse();

    // Initialize the telemetry stack.
    telemetry::init_stack(args.v, args.metrics_port)?;

    // Run the validator service until shutdown.
    service::run(args.validator).await
}
