//! Combat Initializer.
//!
//! Builds the roster `[protagonist, ...companions, ...opponents]` from an
//! [`EncounterRequest`] and a [`RosterPool`]. Unresolvable companions are
//! dropped; if no opponent resolves at all, Entity Recovery projects a ghost
//! of the protagonist instead of failing.
mod recovery;

use std::collections::HashSet;

pub use recovery::RecoveryReport;

use crate::config::EncounterConfig;
use crate::engine::Encounter;
use crate::env::{EncounterRequest, RosterPool};
use crate::error::{CombatError, ErrorSeverity};
use crate::state::{CombatLog, Combatant, CombatantId, Roster};

/// Reasons an encounter cannot be built at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("encounter requested without any opponent references")]
    NoOpponentsRequested,

    #[error("protagonist sheet has an empty id")]
    EmptyProtagonistId,
}

impl CombatError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoOpponentsRequested => "INIT_NO_OPPONENTS_REQUESTED",
            Self::EmptyProtagonistId => "INIT_EMPTY_PROTAGONIST_ID",
        }
    }
}

/// Creates an encounter in the `loading` state.
pub fn initialize<P>(
    request: &EncounterRequest,
    pool: &P,
    config: EncounterConfig,
) -> Result<Encounter, InitializationError>
where
    P: RosterPool + ?Sized,
{
    if request.protagonist.id.trim().is_empty() {
        return Err(InitializationError::EmptyProtagonistId);
    }
    if request.opponent_refs.is_empty() {
        return Err(InitializationError::NoOpponentsRequested);
    }

    let protagonist = Combatant::from_protagonist(&request.protagonist);
    let mut log = CombatLog::new();

    // Ids are unique across the roster; a record resolved twice joins once.
    let mut taken: HashSet<String> = HashSet::from([protagonist.id().as_str().to_string()]);

    let mut allies: Vec<Combatant> = Vec::with_capacity(request.companion_ids.len());
    for id in &request.companion_ids {
        if let Some(record) = pool.companion(id)
            && taken.insert(record.id.clone())
        {
            allies.push(Combatant::companion(&record));
        }
    }

    let mut opponents: Vec<Combatant> = Vec::with_capacity(request.opponent_refs.len());
    for reference in &request.opponent_refs {
        if let Some(record) = pool.opponent(reference)
            && taken.insert(record.id.clone())
        {
            opponents.push(Combatant::opponent(&record));
        }
    }

    let recovery = if opponents.is_empty() {
        let (ghost, report) = recovery::project_ghost(
            &protagonist,
            &request.opponent_refs,
            config.ghost_affinity,
            &mut log,
        );
        opponents.push(ghost);
        Some(report)
    } else {
        None
    };

    let opponent_ids: Vec<CombatantId> = opponents.iter().map(|c| c.id().clone()).collect();
    let roster = Roster::new(protagonist, allies, opponents);

    Ok(Encounter::new(
        config,
        roster,
        log,
        opponent_ids,
        request.inventory.clone(),
        recovery,
    ))
}
