use crate::combat::Targeting;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::{CombatOutcome, CombatantId, Epoch};

/// Errors raised by encounter operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A paced resolution outlived the turn or epoch it was started in.
    #[error(
        "stale resolution (epoch {ticket_epoch:?}/turn {ticket_turn}, now epoch {current_epoch:?}/turn {current_turn})"
    )]
    StaleResolution {
        ticket_epoch: Epoch,
        ticket_turn: u64,
        current_epoch: Epoch,
        current_turn: u64,
    },

    #[error("combatant {0} is not part of this encounter")]
    UnknownCombatant(CombatantId),

    #[error("{actor} cannot aim a {targeting:?} effect at {target}")]
    InvalidTarget {
        actor: CombatantId,
        target: CombatantId,
        targeting: Targeting,
    },

    #[error("{0} is not a defeated opponent")]
    NotDefeated(CombatantId),

    #[error("encounter has not reached an outcome")]
    OutcomeNotReached,

    #[error("dispositions are only negotiated after victory (outcome: {0})")]
    NoNegotiation(CombatOutcome),

    #[error("dispositions missing for {missing:?}")]
    DispositionsIncomplete { missing: Vec<CombatantId> },

    #[error("end payload was already handed off")]
    AlreadyHandedOff,
}

impl CombatError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        use EngineError::*;
        match self {
            StaleResolution { .. } => ErrorSeverity::Stale,
            UnknownCombatant(_)
            | InvalidTarget { .. }
            | NotDefeated(_)
            | OutcomeNotReached
            | NoNegotiation(_)
            | AlreadyHandedOff => ErrorSeverity::Validation,
            DispositionsIncomplete { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use EngineError::*;
        match self {
            StaleResolution { .. } => "ENGINE_STALE_RESOLUTION",
            UnknownCombatant(_) => "ENGINE_UNKNOWN_COMBATANT",
            InvalidTarget { .. } => "ENGINE_INVALID_TARGET",
            NotDefeated(_) => "ENGINE_NOT_DEFEATED",
            OutcomeNotReached => "ENGINE_OUTCOME_NOT_REACHED",
            NoNegotiation(_) => "ENGINE_NO_NEGOTIATION",
            DispositionsIncomplete { .. } => "ENGINE_DISPOSITIONS_INCOMPLETE",
            AlreadyHandedOff => "ENGINE_ALREADY_HANDED_OFF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stale_resolutions_are_discardable() {
        let stale = EngineError::StaleResolution {
            ticket_epoch: Epoch(0),
            ticket_turn: 3,
            current_epoch: Epoch(1),
            current_turn: 3,
        };
        assert!(stale.severity().is_discardable());
        assert_eq!(stale.error_code(), "ENGINE_STALE_RESOLUTION");

        let misaimed = EngineError::InvalidTarget {
            actor: "hero".into(),
            target: "mei".into(),
            targeting: Targeting::SingleEnemy,
        };
        assert!(!misaimed.severity().is_discardable());
        assert_eq!(misaimed.severity(), ErrorSeverity::Validation);
        assert_eq!(misaimed.to_string(), "hero cannot aim a SingleEnemy effect at mei");
    }
}
