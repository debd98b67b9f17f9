//! Event types for different topics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use encounter_core::{
    CombatEndPayload, CombatOutcome, CombatantId, Controller, DefeatedEntity, EncounterSnapshot,
    VisualCue, VisualKind,
};

/// Floating text to draw over a combatant for `duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualEvent {
    pub target: CombatantId,
    pub text: String,
    pub kind: VisualKind,
    pub duration_ms: u64,
}

impl VisualEvent {
    pub fn from_cue(cue: VisualCue, lifetime: Duration) -> Self {
        Self {
            target: cue.target,
            text: cue.text,
            kind: cue.kind,
            duration_ms: u64::try_from(lifetime.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Events related to turn management
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The scheduler paused on `actor`.
    ActorSelected {
        actor: CombatantId,
        turn: u64,
        controller: Controller,
    },

    /// The protagonist must choose an action. There is no timeout.
    AwaitingInput {
        actor: CombatantId,
        snapshot: Box<EncounterSnapshot>,
    },

    /// The acting highlight moved (`None` clears it).
    ActingChanged { acting: Option<CombatantId> },
}

/// Events related to the end of an encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutcomeEvent {
    OutcomeReached { outcome: CombatOutcome },

    /// Victory only: every defeated opponent awaits a disposition.
    DispositionsRequested { defeated: Vec<DefeatedEntity> },

    /// The payload was handed off; the worker stops after this.
    EncounterEnded { payload: Box<CombatEndPayload> },
}
