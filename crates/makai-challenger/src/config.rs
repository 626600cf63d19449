//! Engine configuration and role selection.

use alloy_primitives::Address;

/// An error produced while validating engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither the asserter nor the challenger role was enabled.
    #[error("no role configured: enable the asserter role, the challenger role, or both")]
    NoRoleConfigured,
    /// The dispute contract reported a submission interval of zero blocks.
    #[error("dispute contract reports a zero submission interval")]
    ZeroSubmissionInterval,
}

/// The role(s) this validator plays in challenges.
///
/// The role never changes at runtime; it gates which turns of a challenge the engine
/// will act on and whether the output scanner runs at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Only defend own output submissions.
    AsserterOnly,
    /// Only dispute invalid output submissions.
    ChallengerOnly,
    /// Act on both sides.
    Both,
}

impl Role {
    /// Derives the [Role] from the two CLI role flags.
    ///
    /// Enabling neither is a startup error: a validator with no role would poll
    /// forever without ever acting.
    pub const fn from_flags(asserter: bool, challenger: bool) -> Result<Self, ConfigError> {
        match (asserter, challenger) {
            (true, true) => Ok(Self::Both),
            (true, false) => Ok(Self::AsserterOnly),
            (false, true) => Ok(Self::ChallengerOnly),
            (false, false) => Err(ConfigError::NoRoleConfigured),
        }
    }

    /// Whether this validator defends its own submissions.
    pub const fn is_asserter(&self) -> bool {
        matches!(self, Self::AsserterOnly | Self::Both)
    }

    /// Whether this validator disputes invalid submissions.
    pub const fn is_challenger(&self) -> bool {
        matches!(self, Self::ChallengerOnly | Self::Both)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let role = match self {
            Self::AsserterOnly => "asserter",
            Self::ChallengerOnly => "challenger",
            Self::Both => "asserter+challenger",
        };
        write!(f, "{role}")
    }
}

/// Static configuration of the challenge engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengerConfig {
    /// The role(s) this validator plays.
    pub role: Role,
    /// The L2 chain id the fault proof public input is scoped to.
    pub l2_chain_id: u64,
    /// The local signer address, the engine's identity for challenge membership.
    pub address: Address,
}

impl ChallengerConfig {
    /// Instantiates a new [ChallengerConfig].
    pub const fn new(role: Role, l2_chain_id: u64, address: Address) -> Self {
        Self { role, l2_chain_id, address }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_flags() {
        assert_eq!(Role::from_flags(true, true).unwrap(), Role::Both);
        assert_eq!(Role::from_flags(true, false).unwrap(), Role::AsserterOnly);
        assert_eq!(Role::from_flags(false, true).unwrap(), Role::ChallengerOnly);
        assert_eq!(Role::from_flags(false, false).unwrap_err(), ConfigError::NoRoleConfigured);
    }

    #[test]
    fn test_role_gates() {
        assert!(Role::Both.is_asserter() && Role::Both.is_challenger());
        assert!(Role::AsserterOnly.is_asserter() && !Role::AsserterOnly.is_challenger());
        assert!(!Role::ChallengerOnly.is_asserter() && Role::ChallengerOnly.is_challenger());
    }
}
