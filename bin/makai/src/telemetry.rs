//! Tracing and metrics initialization.

use makai_challenger::Metrics;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing stack and Prometheus metrics recorder.
///
/// This function should be called at the beginning of the program. `RUST_LOG`
/// directives override the verbosity-derived default.
pub(crate) fn init_stack(verbosity: u8, metrics_port: u16) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).try_init()?;

    let prometheus_addr = SocketAddr::from(([0, 0, 0, 0], metrics_port));
    let builder = PrometheusBuilder::new().with_http_listener(prometheus_addr);
    if let Err(err) = builder.install() {
        anyhow::bail!("failed to install Prometheus recorder: {err:?}");
    }
    Metrics::init();

    info!("Telemetry initialized. Serving Prometheus metrics at: http://{prometheus_addr}");
    Ok(())
}
