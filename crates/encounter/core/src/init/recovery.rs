//! Entity Recovery: the ghost fallback.

use crate::state::{CombatLog, Combatant, CombatantId, SpeakerClass};

/// Record of an initialization that had to synthesize its opponent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecoveryReport {
    /// Opponent references that failed to resolve.
    pub requested: Vec<String>,
    pub ghost_id: CombatantId,
}

/// Mirrors the protagonist into the sole opponent and logs the failure.
pub(super) fn project_ghost(
    protagonist: &Combatant,
    requested: &[String],
    affinity: i32,
    log: &mut CombatLog,
) -> (Combatant, RecoveryReport) {
    let anchor = requested.first().map(String::as_str).unwrap_or("unknown");
    let ghost_id = CombatantId::new(format!("ghost:{anchor}"));
    let ghost = Combatant::mirror_from(protagonist, ghost_id.clone(), affinity);

    log.push(
        SpeakerClass::System,
        format!(
            "Opponent data for [{}] could not be found. {} takes shape in their place.",
            requested.join(", "),
            ghost.name
        ),
    );

    let report = RecoveryReport {
        requested: requested.to_vec(),
        ghost_id,
    };
    (ghost, report)
}
