use super::{Effect, EffectKind, VisualCue, VisualKind};
use crate::config::EncounterConfig;
use crate::engine::EngineError;
use crate::state::{
    CombatLog, CombatLogEntry, Combatant, CombatantId, Faction, Roster, SpeakerClass,
};

/// Damage dealt by an attack.
///
/// # Formula
///
/// ```text
/// damage = max(1, base_power + attack - defense)
/// ```
pub fn calculate_damage(base_power: u32, attack: u32, defense: u32) -> u32 {
    let raw = i64::from(base_power) + i64::from(attack) - i64::from(defense);
    raw.clamp(1, i64::from(u32::MAX)) as u32
}

/// New HP after taking `damage` (never below 0).
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

/// New HP after receiving `heal` (never above `max_hp`).
pub fn apply_heal(current_hp: u32, max_hp: u32, heal: u32) -> u32 {
    current_hp.saturating_add(heal).min(max_hp)
}

/// Result of applying one effect, used to publish log and visual events.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectApplied {
    pub source: CombatantId,
    pub target: CombatantId,
    pub kind: EffectKind,
    /// Damage dealt or HP restored, as computed before clamping.
    pub amount: u32,
    pub target_hp: u32,
    pub target_defeated: bool,
    pub log: Vec<CombatLogEntry>,
    pub cue: VisualCue,
}

/// Log attribution for an action performed by `source`.
fn speaker_for(source: &Combatant) -> SpeakerClass {
    if source.is_protagonist() {
        SpeakerClass::Player
    } else if source.faction() == Faction::OpponentSide {
        SpeakerClass::Enemy
    } else {
        SpeakerClass::Ally
    }
}

/// Applies `effect` from `source` to `target`, mutating the roster and log.
///
/// A target on the wrong side for `effect.targeting` is rejected before
/// anything is touched.
pub fn resolve_effect(
    roster: &mut Roster,
    log: &mut CombatLog,
    source: &CombatantId,
    target: &CombatantId,
    effect: &Effect,
    action_name: &str,
    config: &EncounterConfig,
) -> Result<EffectApplied, EngineError> {
    let source_unit = roster
        .get(source)
        .ok_or_else(|| EngineError::UnknownCombatant(source.clone()))?;
    let speaker = speaker_for(source_unit);
    let source_name = source_unit.name.clone();
    let source_faction = source_unit.faction();
    let attack = source_unit.attack;

    let target_unit = roster
        .get_mut(target)
        .ok_or_else(|| EngineError::UnknownCombatant(target.clone()))?;
    if !effect.targeting.accepts(source_faction, target_unit.faction()) {
        return Err(EngineError::InvalidTarget {
            actor: source.clone(),
            target: target.clone(),
            targeting: effect.targeting,
        });
    }
    let log_start = log.len();

    let (amount, cue) = match effect.kind {
        EffectKind::DamageHp => {
            let damage =
                calculate_damage(effect.base_power.unwrap_or(0), attack, target_unit.defense);
            target_unit.set_hp(apply_damage(target_unit.current_hp(), damage));
            log.push(
                speaker,
                format!(
                    "{source_name} uses {action_name} on {} for {damage} damage.",
                    target_unit.name
                ),
            );
            let cue = VisualCue {
                target: target.clone(),
                text: format!("-{damage}"),
                kind: VisualKind::Damage,
            };
            (damage, cue)
        }
        EffectKind::HealHp => {
            let heal = effect.flat_value.unwrap_or(config.default_heal);
            target_unit.set_hp(apply_heal(target_unit.current_hp(), target_unit.max_hp(), heal));
            log.push(
                speaker,
                format!(
                    "{source_name} uses {action_name} on {}, restoring {heal} HP.",
                    target_unit.name
                ),
            );
            let cue = VisualCue {
                target: target.clone(),
                text: format!("+{heal}"),
                kind: VisualKind::Heal,
            };
            (heal, cue)
        }
    };

    let target_defeated = !target_unit.is_alive();
    if target_defeated && effect.kind == EffectKind::DamageHp {
        log.push(SpeakerClass::Info, format!("{} is defeated.", target_unit.name));
    }

    Ok(EffectApplied {
        source: source.clone(),
        target: target.clone(),
        kind: effect.kind,
        amount,
        target_hp: target_unit.current_hp(),
        target_defeated,
        log: log.since(log_start).to_vec(),
        cue,
    })
}
