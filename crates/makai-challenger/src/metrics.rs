//! Metrics for the challenge engine.

use crate::{Action, ErrorSeverity};

/// Container for metrics.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the gauge tracking the next output index the scanner will verify.
    pub const SCAN_CHECKPOINT: &str = "makai_scan_checkpoint";

    /// Identifier for the counter of submitted outputs verified clean.
    pub const OUTPUTS_VERIFIED: &str = "makai_outputs_verified";

    /// Identifier for the counter of submitted outputs that did not match the local chain.
    pub const OUTPUT_MISMATCHES: &str = "makai_output_mismatches";

    /// Identifier for the counter of dispatched actions, labeled by action.
    pub const ACTIONS: &str = "makai_actions";

    /// Identifier for the counter of tick-aborting errors, labeled by severity.
    pub const TICK_ERRORS: &str = "makai_tick_errors";

    /// Initializes metrics for the challenge engine.
    ///
    /// This does two things:
    /// * Describes various metrics.
    /// * Initializes metrics to 0 so they can be queried immediately.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    /// Describes the metrics used by the challenge engine.
    pub fn describe() {
        metrics::describe_gauge!(
            Self::SCAN_CHECKPOINT,
            "Next submitted output index the scanner will verify"
        );

        metrics::describe_counter!(
            Self::OUTPUTS_VERIFIED,
            metrics::Unit::Count,
            "Submitted outputs that matched the locally recomputed commitment"
        );

        metrics::describe_counter!(
            Self::OUTPUT_MISMATCHES,
            metrics::Unit::Count,
            "Submitted outputs that did not match the locally recomputed commitment"
        );

        metrics::describe_counter!(
            Self::ACTIONS,
            metrics::Unit::Count,
            "Actions dispatched by the challenge engine"
        );

        metrics::describe_counter!(
            Self::TICK_ERRORS,
            metrics::Unit::Count,
            "Errors that aborted a poll tick, by severity"
        );
    }

    /// Initializes metrics to `0` so they can be queried immediately by consumers of
    /// prometheus metrics.
    fn zero() {
        metrics::counter!(Self::OUTPUTS_VERIFIED).increment(0);
        metrics::counter!(Self::OUTPUT_MISMATCHES).increment(0);
        metrics::counter!(Self::TICK_ERRORS, "severity" => ErrorSeverity::Transient.to_string())
            .increment(0);
        metrics::counter!(Self::TICK_ERRORS, "severity" => ErrorSeverity::Fatal.to_string())
            .increment(0);
    }

    /// Records the scanner checkpoint after it moved.
    pub(crate) fn record_checkpoint(checkpoint: u64) {
        metrics::gauge!(Self::SCAN_CHECKPOINT).set(checkpoint as f64);
    }

    /// Records one cleanly verified output.
    pub(crate) fn record_verified() {
        metrics::counter!(Self::OUTPUTS_VERIFIED).increment(1);
    }

    /// Records one detected output mismatch.
    pub(crate) fn record_mismatch() {
        metrics::counter!(Self::OUTPUT_MISMATCHES).increment(1);
    }

    /// Records a dispatched action. Idle ticks are not counted.
    pub(crate) fn record_action(action: &Action) {
        if matches!(action, Action::None) {
            return;
        }
        metrics::counter!(Self::ACTIONS, "action" => action.label()).increment(1);
    }

    /// Records an error that aborted a poll tick.
    pub fn record_tick_error(severity: ErrorSeverity) {
        metrics::counter!(Self::TICK_ERRORS, "severity" => severity.to_string()).increment(1);
    }
}
