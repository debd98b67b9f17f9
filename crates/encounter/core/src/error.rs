//! Common error infrastructure for encounter-core.
//!
//! Domain errors (`EngineError`, `InitializationError`) live beside the code
//! that raises them; this module only provides the shared classification.

/// Severity level of an error, used for logging priority and recovery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was valid once but raced with a state change.
    ///
    /// Examples: a paced resolution arriving after the outcome was set.
    Stale,

    /// Invalid input, should not be retried without changes.
    ///
    /// Examples: unknown combatant id, no opponents requested
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stale => "stale",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the caller can drop the request and carry on.
    pub const fn is_discardable(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Common trait for all encounter-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by how the caller should react, not by impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str;
}
