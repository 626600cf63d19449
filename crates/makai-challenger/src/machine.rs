//! The challenge state machine.
//!
//! A pure decision function: contract state in, one action out. All I/O happens in the
//! dispatcher, which feeds the function what it read; the rules themselves never touch
//! the network and are exhaustively unit-testable.

use crate::Role;
use makai_protocol::{ChallengeStatus, OutputRange};

/// The single action the engine takes on one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do this tick.
    None,
    /// Dispute the invalid output over the given range.
    CreateChallenge(OutputRange),
    /// Answer the current bisection turn.
    Bisect,
    /// Claim the asserter's missed turn deadline.
    ClaimAsserterTimeout,
    /// Claim the challenger's missed turn deadline.
    ClaimChallengerTimeout,
    /// Submit the final fault proof.
    ProveFault,
    /// A challenge is in progress but this validator has no standing in it.
    LogUnrelated,
}

impl Action {
    /// A stable label for logs and metrics.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CreateChallenge(_) => "create_challenge",
            Self::Bisect => "bisect",
            Self::ClaimAsserterTimeout => "claim_asserter_timeout",
            Self::ClaimChallengerTimeout => "claim_challenger_timeout",
            Self::ProveFault => "prove_fault",
            Self::LogUnrelated => "unrelated",
        }
    }
}

/// Decides the next action from the state read this tick.
///
/// `scanned` is the output scanner's result; the dispatcher only runs the scanner in
/// the no-challenge branch of challenger-role processes, and `None` otherwise.
pub const fn next_action(
    role: Role,
    in_progress: bool,
    is_related: bool,
    status: ChallengeStatus,
    scanned: Option<OutputRange>,
) -> Action {
    if !in_progress {
        return match scanned {
            Some(range) if role.is_challenger() => Action::CreateChallenge(range),
            _ => Action::None,
        };
    }
    if !is_related {
        return Action::LogUnrelated;
    }
    match status {
        ChallengeStatus::AsserterTurn if role.is_asserter() => Action::Bisect,
        ChallengeStatus::ChallengerTurn if role.is_challenger() => Action::Bisect,
        ChallengeStatus::AsserterTimeout if role.is_challenger() => Action::ClaimAsserterTimeout,
        ChallengeStatus::ProveReady if role.is_challenger() => Action::ProveFault,
        // TODO: dispatch ClaimChallengerTimeout on (asserter, ChallengerTimeout) once
        // asserter-side timeout claiming is enabled; the calldata builder already exists.
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: OutputRange = OutputRange::new(10, 900, 1000);

    fn related(role: Role, status: ChallengeStatus) -> Action {
        next_action(role, true, true, status, None)
    }

    #[test]
    fn test_unrelated_challenge() {
        let action = next_action(Role::Both, true, false, ChallengeStatus::AsserterTurn, None);
        assert_eq!(action, Action::LogUnrelated);
    }

    #[test]
    fn test_create_challenge_requires_challenger_role() {
        let action = next_action(
            Role::ChallengerOnly,
            false,
            false,
            ChallengeStatus::NoChallenge,
            Some(RANGE),
        );
        assert_eq!(action, Action::CreateChallenge(RANGE));

        let action = next_action(
            Role::AsserterOnly,
            false,
            false,
            ChallengeStatus::NoChallenge,
            Some(RANGE),
        );
        assert_eq!(action, Action::None);

        let action = next_action(Role::Both, false, false, ChallengeStatus::NoChallenge, None);
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_turn_gating() {
        assert_eq!(related(Role::AsserterOnly, ChallengeStatus::AsserterTurn), Action::Bisect);
        assert_eq!(related(Role::ChallengerOnly, ChallengeStatus::ChallengerTurn), Action::Bisect);

        // A role never answers the counterparty's turn.
        assert_eq!(related(Role::ChallengerOnly, ChallengeStatus::AsserterTurn), Action::None);
        assert_eq!(related(Role::AsserterOnly, ChallengeStatus::ChallengerTurn), Action::None);

        assert_eq!(related(Role::Both, ChallengeStatus::AsserterTurn), Action::Bisect);
        assert_eq!(related(Role::Both, ChallengeStatus::ChallengerTurn), Action::Bisect);
    }

    #[test]
    fn test_timeout_claims() {
        let action = related(Role::ChallengerOnly, ChallengeStatus::AsserterTimeout);
        assert_eq!(action, Action::ClaimAsserterTimeout);
        assert_eq!(related(Role::AsserterOnly, ChallengeStatus::AsserterTimeout), Action::None);

        // Challenger timeouts are deliberately not claimed.
        assert_eq!(related(Role::AsserterOnly, ChallengeStatus::ChallengerTimeout), Action::None);
        assert_eq!(related(Role::Both, ChallengeStatus::ChallengerTimeout), Action::None);
    }

    #[test]
    fn test_prove_fault() {
        assert_eq!(related(Role::ChallengerOnly, ChallengeStatus::ProveReady), Action::ProveFault);
        assert_eq!(related(Role::Both, ChallengeStatus::ProveReady), Action::ProveFault);
        assert_eq!(related(Role::AsserterOnly, ChallengeStatus::ProveReady), Action::None);
    }

    #[test]
    fn test_waiting_states() {
        assert_eq!(related(Role::Both, ChallengeStatus::NoChallenge), Action::None);
        assert_eq!(related(Role::ChallengerOnly, ChallengeStatus::ChallengerTimeout), Action::None);
    }
}
