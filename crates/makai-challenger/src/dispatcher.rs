//! The per-tick action dispatcher.

use crate::{
    bisection::{build_segments, select_fault_position, FIRST_TURN},
    fault::build_fault_proof,
    machine::{next_action, Action},
    ChallengerConfig, ChallengerError, ConfigError, Metrics, OutputScanner,
};
use makai_protocol::{ChallengeStatus, OutputRange};
use makai_providers::{calldata, DisputeOracle, OutputSource, Prover, TxCandidate};

/// The challenge engine.
///
/// One instance drives all challenge activity for one validator: per poll tick it
/// reads the dispute contract, decides the next action through the pure state machine
/// and builds at most one unsigned transaction. The only state carried across ticks is
/// the scanner checkpoint, so the engine takes `&mut self` per tick and is not meant
/// for concurrent invocation.
#[derive(Debug)]
pub struct Challenger<O, S, P> {
    /// Read access to the dispute contract.
    oracle: O,
    /// The local rollup node.
    source: S,
    /// The fault proof service.
    prover: P,
    /// Static engine configuration.
    config: ChallengerConfig,
    /// The invalid output scanner and its checkpoint.
    scanner: OutputScanner,
}

impl<O, S, P> Challenger<O, S, P>
where
    O: DisputeOracle,
    S: OutputSource,
    P: Prover,
{
    /// Initializes the engine, reading the protocol constants from the dispute
    /// contract once.
    ///
    /// A zero submission interval would make every scan range empty and divide the
    /// finalization window by zero, so the engine refuses to start on it.
    pub async fn init(
        oracle: O,
        source: S,
        prover: P,
        config: ChallengerConfig,
    ) -> Result<Self, ChallengerError> {
        let submission_interval = oracle.submission_interval().await?;
        if submission_interval == 0 {
            return Err(ConfigError::ZeroSubmissionInterval.into());
        }
        let finalization_period = oracle.finalization_period().await?;
        let scanner = OutputScanner::new(submission_interval, finalization_period);
        info!(
            target: "challenger",
            role = %config.role,
            address = %config.address,
            submission_interval,
            finalization_period,
            "Challenge engine initialized"
        );
        Ok(Self { oracle, source, prover, config, scanner })
    }

    /// Runs one poll tick: reads contract state, decides the next action and builds
    /// the unsigned transaction for it, if any.
    pub async fn determine_challenge_tx(&mut self) -> Result<Option<TxCandidate>, ChallengerError> {
        let in_progress = self.oracle.is_challenge_in_progress().await?;
        let (is_related, status) = if in_progress {
            let is_related = self.oracle.is_related(self.config.address).await?;
            let status = if is_related {
                self.oracle.status_in_progress().await?
            } else {
                ChallengeStatus::NoChallenge
            };
            (is_related, status)
        } else {
            (false, ChallengeStatus::NoChallenge)
        };

        // The scanner only runs when there is no challenge to react to and this
        // validator would act on a find.
        let scanned = if !in_progress && self.config.role.is_challenger() {
            self.scanner.find_invalid_output_range(&self.oracle, &self.source).await?
        } else {
            None
        };

        let action = next_action(self.config.role, in_progress, is_related, status, scanned);
        Metrics::record_action(&action);
        match action {
            Action::None => Ok(None),
            Action::LogUnrelated => {
                info!(target: "challenger", "In-progress challenge involves other validators");
                Ok(None)
            }
            Action::CreateChallenge(range) => self.create_challenge_tx(range).await.map(Some),
            Action::Bisect => self.bisect_tx().await.map(Some),
            Action::ClaimAsserterTimeout => {
                warn!(target: "challenger", "Claiming asserter timeout");
                Ok(Some(calldata::asserter_timeout(self.oracle.address())))
            }
            Action::ClaimChallengerTimeout => self.challenger_timeout_tx().await.map(Some),
            Action::ProveFault => self.prove_fault_tx().await.map(Some),
        }
    }

    /// Shuts down the engine, releasing the prover connection.
    pub async fn shutdown(&self) {
        self.prover.close().await;
        info!(target: "challenger", "Challenge engine shut down");
    }

    async fn create_challenge_tx(
        &self,
        range: OutputRange,
    ) -> Result<TxCandidate, ChallengerError> {
        warn!(target: "challenger", %range, "Disputing invalid output");
        let segments =
            build_segments(&self.oracle, &self.source, FIRST_TURN, range.start_block, range.size())
                .await?;
        Ok(calldata::create_challenge(
            self.oracle.address(),
            range.output_index,
            segments.into_hashes(),
        ))
    }

    async fn bisect_tx(&self) -> Result<TxCandidate, ChallengerError> {
        let challenge = self.oracle.challenge_in_progress().await?;
        let position = select_fault_position(&self.source, &challenge.segments).await?;
        let (start, size) = challenge.segments.next_segments_range(position)?;
        let next_turn = challenge.turn.checked_add(1).ok_or(ChallengerError::TurnOverflow)?;
        let segments = build_segments(&self.oracle, &self.source, next_turn, start, size).await?;
        info!(
            target: "challenger",
            id = %challenge.id,
            position,
            start,
            size,
            turn = next_turn,
            "Answering bisection turn"
        );
        Ok(calldata::bisect(self.oracle.address(), position, segments.into_hashes()))
    }

    async fn challenger_timeout_tx(&self) -> Result<TxCandidate, ChallengerError> {
        let challenge = self.oracle.challenge_in_progress().await?;
        warn!(target: "challenger", id = %challenge.id, "Claiming challenger timeout");
        Ok(calldata::challenger_timeout(self.oracle.address(), challenge.id))
    }

    async fn prove_fault_tx(&self) -> Result<TxCandidate, ChallengerError> {
        let challenge = self.oracle.challenge_in_progress().await?;
        let position = select_fault_position(&self.source, &challenge.segments).await?;
        let inputs =
            build_fault_proof(&self.source, &challenge.segments, position, self.config.l2_chain_id)
                .await?;
        let artifact = self.prover.fetch_proof_and_pair(&inputs.dst_block_ref).await?;
        info!(
            target: "fault_prover",
            id = %challenge.id,
            position = inputs.position,
            block = inputs.dst_block_ref.number(),
            "Submitting fault proof"
        );
        Ok(calldata::prove_fault(
            self.oracle.address(),
            inputs.position,
            inputs.src_proof,
            inputs.dst_proof,
            inputs.public_input,
            inputs.header_rlp,
            artifact,
        ))
    }
}
