//! Engine error taxonomy.

use crate::ConfigError;
use alloy_primitives::B256;
use makai_protocol::{OutputRootError, SegmentsError};
use makai_providers::ProviderError;

/// How a tick-level error should be treated by the driving loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Expected I/O weather. The tick is aborted with state unchanged and the next
    /// tick retries.
    Transient,
    /// A protocol invariant does not hold or the configuration is unusable. Retrying
    /// cannot help without operator intervention.
    Fatal,
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transient => write!(f, "transient"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

/// An error produced by the challenge engine.
#[derive(Debug, thiserror::Error)]
pub enum ChallengerError {
    /// A collaborator call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// A segments array violated a structural invariant.
    #[error(transparent)]
    Segments(#[from] SegmentsError),
    /// An output commitment could not be computed or verified.
    #[error(transparent)]
    OutputRoot(#[from] OutputRootError),
    /// The engine configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Every sampled point of the counterparty's segments matches the local chain.
    ///
    /// The challenge this engine is party to disputes a range it cannot fault, which
    /// means one side of the game is operating on corrupt data.
    #[error("no fault found in disputed segments")]
    NoFaultFound,
    /// The counterparty's segments diverge at the first sampled point.
    ///
    /// Both parties committed to that endpoint in the previous round, so it cannot
    /// legitimately diverge.
    #[error("segments diverge at the range start, block {block}")]
    DivergenceAtRangeStart {
        /// The first sampled block of the disputed range.
        block: u64,
    },
    /// The dispute contract reported zero sections for a bisection turn.
    #[error("dispute contract reports zero sections for turn {turn}")]
    ZeroSections {
        /// The turn the sections were requested for.
        turn: u8,
    },
    /// The challenge turn counter cannot be advanced.
    #[error("challenge turn counter overflowed")]
    TurnOverflow,
    /// An on-chain output claims a block number below the submission interval.
    #[error("output {index} claims block {block}, below the submission interval")]
    OutputBelowInterval {
        /// The output index.
        index: u64,
        /// The claimed L2 block number.
        block: u64,
    },
    /// A snapshot requested with extended fields came back without them.
    #[error("snapshot at block {number} is missing next block header or transactions")]
    MissingNextBlockData {
        /// The block the snapshot was requested at.
        number: u64,
    },
    /// The carried next-block header does not hash to the snapshot's next-block hash.
    #[error("header hash mismatch: computed {computed}, snapshot reports {expected}")]
    HeaderHashMismatch {
        /// The hash of the carried header.
        computed: B256,
        /// The next-block hash the snapshot reports.
        expected: B256,
    },
}

impl ChallengerError {
    /// Classifies this error for the driving loop.
    ///
    /// Only collaborator I/O weather is transient; everything else signals state that
    /// a retry cannot repair.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Provider(err) if err.is_transient() => ErrorSeverity::Transient,
            _ => ErrorSeverity::Fatal,
        }
    }
}
