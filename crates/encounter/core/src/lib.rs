//! Deterministic rules for action-gauge combat encounters.
//!
//! `encounter-core` defines the canonical combat rules (roster, gauges, turn
//! control, effect resolution, outcome and dispositions) as pure, synchronous
//! APIs. Clocks, pacing delays and event delivery belong to the runtime crate;
//! everything that mutates an encounter flows through [`engine::Encounter`].
pub mod combat;
pub mod config;
pub mod disposition;
pub mod engine;
pub mod env;
pub mod error;
pub mod init;
pub mod state;

pub use combat::{
    Effect, EffectApplied, EffectKind, Targeting, VisualCue, VisualKind, apply_damage,
    apply_heal, calculate_damage,
};
pub use config::EncounterConfig;
pub use disposition::{
    CombatEndPayload, CombatantVitals, DefeatedEntity, Disposition, DispositionSheet,
    VitalSnapshot,
};
pub use engine::{
    AiPlan, Controller, Encounter, EncounterSnapshot, EngineError, PlayerAction,
    PlayerResolution, ResolutionTicket, SchedulerState, Submission, TickResult, TurnPhase,
    TurnStart,
};
pub use env::{
    CharacterRecord, Dice, EncounterRequest, InventoryItem, PoolCategory, ProtagonistSheet,
    RngDice, RosterPool,
};
pub use error::{CombatError, ErrorSeverity};
pub use init::{InitializationError, RecoveryReport, initialize};
pub use state::{
    CombatLog, CombatLogEntry, CombatOutcome, Combatant, CombatantId, EntityKind, Epoch,
    Faction, Roster, SpeakerClass, StatusEffect,
};
