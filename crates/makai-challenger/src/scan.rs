//! The invalid output scanner.

use crate::{ChallengerError, Metrics};
use makai_protocol::OutputRange;
use makai_providers::{DisputeOracle, OutputSource};

/// A checkpointed scanner over submitted output commitments.
///
/// The scanner walks output indices in submission order, comparing each on-chain
/// commitment against the local rollup node's recomputation, and yields the first
/// disputed [OutputRange]. The checkpoint is the next index to verify; it lives only
/// in process memory, and a restarted scanner re-derives its starting point from the
/// finalization window, so nothing still disputable is ever skipped.
#[derive(Debug, Clone)]
pub struct OutputScanner {
    /// The next output index to verify. Derived lazily on the first scan.
    checkpoint: Option<u64>,
    /// How many output submissions fit in the finalization window.
    waiting_outputs: u64,
    /// The protocol-fixed number of L2 blocks between output submissions.
    submission_interval: u64,
}

impl OutputScanner {
    /// Instantiates a new [OutputScanner].
    ///
    /// `submission_interval` comes from the dispute contract and is validated non-zero
    /// at engine initialization.
    pub const fn new(submission_interval: u64, finalization_period: u64) -> Self {
        Self {
            checkpoint: None,
            waiting_outputs: finalization_period / submission_interval,
            submission_interval,
        }
    }

    /// Returns the current checkpoint.
    pub const fn checkpoint(&self) -> Option<u64> {
        self.checkpoint
    }

    /// Walks submitted outputs from the checkpoint and returns the first range whose
    /// on-chain commitment disagrees with the local recomputation.
    ///
    /// The checkpoint moves at exactly three points: initialization, a detected
    /// mismatch (pinned to the mismatched index until the dispute resolves) and clean
    /// completion (just past the latest index). Any I/O error aborts the scan before
    /// reaching one of them, so a timeout mid-scan can never skip verification of an
    /// index; already verified indices are simply re-verified on the next tick.
    pub async fn find_invalid_output_range<O, S>(
        &mut self,
        oracle: &O,
        source: &S,
    ) -> Result<Option<OutputRange>, ChallengerError>
    where
        O: DisputeOracle,
        S: OutputSource,
    {
        let next_output_index = oracle.next_output_index().await?;
        if next_output_index == 0 {
            return Ok(None);
        }
        let latest_index = next_output_index - 1;

        let start = match self.checkpoint {
            Some(checkpoint) => checkpoint,
            None => {
                if self.waiting_outputs == 0 {
                    // Without a finalization window nothing already submitted is still
                    // disputable; start watching from the latest index onward.
                    self.set_checkpoint(latest_index);
                    return Ok(None);
                }
                let initial = if next_output_index < self.waiting_outputs {
                    1
                } else {
                    // At or before the start of the still-disputable window.
                    latest_index % self.waiting_outputs
                };
                debug!(
                    target: "output_scanner",
                    checkpoint = initial,
                    "Scanner checkpoint initialized"
                );
                self.set_checkpoint(initial);
                initial
            }
        };

        for index in start..=latest_index {
            let submitted = oracle.output_at(index).await?;
            let snapshot = source.output_at(submitted.l2_block_number, false).await?;
            if snapshot.output_root != submitted.output_root {
                warn!(
                    target: "output_scanner",
                    index,
                    block = submitted.l2_block_number,
                    on_chain = %submitted.output_root,
                    local = %snapshot.output_root,
                    "Output commitment mismatch detected"
                );
                Metrics::record_mismatch();
                self.set_checkpoint(index);
                let start_block = submitted
                    .l2_block_number
                    .checked_sub(self.submission_interval)
                    .ok_or(ChallengerError::OutputBelowInterval {
                        index,
                        block: submitted.l2_block_number,
                    })?;
                return Ok(Some(OutputRange::new(index, start_block, submitted.l2_block_number)));
            }
            debug!(
                target: "output_scanner",
                index,
                block = submitted.l2_block_number,
                "Output verified"
            );
            Metrics::record_verified();
        }

        self.set_checkpoint(latest_index + 1);
        Ok(None)
    }

    fn set_checkpoint(&mut self, checkpoint: u64) {
        self.checkpoint = Some(checkpoint);
        Metrics::record_checkpoint(checkpoint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{snapshot, MockOracle, MockSource};
    use alloy_primitives::{B256, U256};
    use makai_providers::SubmittedOutput;

    fn root(index: u64) -> B256 {
        B256::from(U256::from(0xbeef + index))
    }

    /// An oracle/source pair where output `i` commits block `i * 100` and every
    /// commitment matches the local chain.
    fn valid_history(next_output_index: u64) -> (MockOracle, MockSource) {
        let mut oracle = MockOracle::default();
        let mut source = MockSource::default();
        oracle.next_output_index = next_output_index;
        for index in 0..next_output_index {
            let block = index * 100;
            let output = SubmittedOutput { output_root: root(index), l2_block_number: block };
            oracle.outputs.insert(index, output);
            source.snapshots.insert(block, snapshot(block, root(index)));
        }
        (oracle, source)
    }

    #[tokio::test]
    async fn test_no_outputs_submitted() {
        let (oracle, source) = valid_history(0);
        let mut scanner = OutputScanner::new(100, 10000);
        assert_eq!(scanner.find_invalid_output_range(&oracle, &source).await.unwrap(), None);
        assert_eq!(scanner.checkpoint(), None);
    }

    #[tokio::test]
    async fn test_detects_mismatch_with_submission_interval_range() {
        // Matches for indices 0 through 9, mismatch at 10 committing block 1000.
        let (oracle, mut source) = valid_history(11);
        source.snapshots.insert(1000, snapshot(1000, B256::with_last_byte(0xff)));

        let mut scanner = OutputScanner::new(100, 10000);
        let range = scanner.find_invalid_output_range(&oracle, &source).await.unwrap().unwrap();
        assert_eq!(range, OutputRange::new(10, 900, 1000));
        assert_eq!(scanner.checkpoint(), Some(10));
    }

    #[tokio::test]
    async fn test_checkpoint_pins_at_mismatch_until_resolved() {
        let (oracle, mut source) = valid_history(11);
        source.snapshots.insert(1000, snapshot(1000, B256::with_last_byte(0xff)));
        let mut scanner = OutputScanner::new(100, 10000);

        let first = scanner.find_invalid_output_range(&oracle, &source).await.unwrap();
        let second = scanner.find_invalid_output_range(&oracle, &source).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(scanner.checkpoint(), Some(10));

        // Once the chain agrees again the scanner moves past the pinned index.
        source.snapshots.insert(1000, snapshot(1000, root(10)));
        assert_eq!(scanner.find_invalid_output_range(&oracle, &source).await.unwrap(), None);
        assert_eq!(scanner.checkpoint(), Some(11));
    }

    #[tokio::test]
    async fn test_idempotent_on_unchanged_chain() {
        let (oracle, source) = valid_history(11);
        let mut scanner = OutputScanner::new(100, 10000);

        assert_eq!(scanner.find_invalid_output_range(&oracle, &source).await.unwrap(), None);
        assert_eq!(scanner.checkpoint(), Some(11));

        let queried_before = oracle.output_queries.lock().unwrap().len();
        assert_eq!(scanner.find_invalid_output_range(&oracle, &source).await.unwrap(), None);
        assert_eq!(scanner.checkpoint(), Some(11));
        // The second scan had an empty window: no output was re-queried.
        assert_eq!(oracle.output_queries.lock().unwrap().len(), queried_before);
    }

    #[tokio::test]
    async fn test_short_history_starts_at_one() {
        let (oracle, source) = valid_history(11);
        let mut scanner = OutputScanner::new(100, 10000);
        scanner.find_invalid_output_range(&oracle, &source).await.unwrap();

        // next_output_index = 11 < waiting_outputs = 100, so index 0 is never queried.
        let queries = oracle.output_queries.lock().unwrap();
        assert_eq!(*queries.first().unwrap(), 1);
        assert!(!queries.contains(&0));
    }

    #[tokio::test]
    async fn test_fresh_checkpoint_derives_from_finalization_window() {
        let (oracle, source) = valid_history(251);
        let mut scanner = OutputScanner::new(100, 10000);
        assert_eq!(scanner.find_invalid_output_range(&oracle, &source).await.unwrap(), None);
        assert_eq!(scanner.checkpoint(), Some(251));

        // latest_index % waiting_outputs = 250 % 100: nothing below 50 is queried.
        let queries = oracle.output_queries.lock().unwrap();
        assert_eq!(*queries.iter().min().unwrap(), 50);
    }

    #[tokio::test]
    async fn test_zero_finalization_window_skips_history() {
        let (oracle, source) = valid_history(11);
        let mut scanner = OutputScanner::new(100, 0);
        assert_eq!(scanner.find_invalid_output_range(&oracle, &source).await.unwrap(), None);
        assert_eq!(scanner.checkpoint(), Some(10));
        assert!(oracle.output_queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_io_error_leaves_checkpoint_unchanged() {
        let (oracle, mut source) = valid_history(11);
        // The node has not derived block 500 yet.
        source.snapshots.remove(&500);
        let mut scanner = OutputScanner::new(100, 10000);

        let err = scanner.find_invalid_output_range(&oracle, &source).await.unwrap_err();
        assert_eq!(err.severity(), crate::ErrorSeverity::Transient);
        // Initialization committed, but no verified index was recorded past it.
        assert_eq!(scanner.checkpoint(), Some(1));
    }

    #[tokio::test]
    async fn test_malformed_block_number_is_fatal() {
        let (mut oracle, mut source) = valid_history(3);
        // Output 2 claims a block below the submission interval.
        oracle.outputs.insert(2, SubmittedOutput { output_root: root(2), l2_block_number: 50 });
        source.snapshots.insert(50, snapshot(50, B256::with_last_byte(0xff)));

        let mut scanner = OutputScanner::new(100, 10000);
        let err = scanner.find_invalid_output_range(&oracle, &source).await.unwrap_err();
        assert!(matches!(err, ChallengerError::OutputBelowInterval { index: 2, block: 50 }));
        assert_eq!(err.severity(), crate::ErrorSeverity::Fatal);
    }
}
