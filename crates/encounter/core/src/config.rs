use std::time::Duration;

/// Encounter timing and scaling parameters.
///
/// Defaults are the standard tuning; content files may
/// override individual fields.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterConfig {
    /// Gauge value at which a combatant takes its turn.
    pub gauge_max: f64,
    /// Scheduler tick interval in milliseconds.
    pub tick_ms: u64,
    /// Gauge gained per tick per point of speed.
    pub gauge_speed_factor: f64,
    /// Base power of the protagonist's basic attack.
    pub player_attack_power: u32,
    /// Base power of the basic attack used by allies and opponents.
    pub ai_attack_power: u32,
    /// Pause before and after an effect is applied, in milliseconds.
    pub pacing_delay_ms: u64,
    /// Probability in `[0, 1]` that a flee attempt succeeds.
    pub flee_success_chance: f64,
    /// Heal amount used when a heal effect carries no flat value.
    pub default_heal: u32,
    /// Lifetime of a floating visual event, in milliseconds.
    pub vfx_duration_ms: u64,
    /// Affinity stamped on a recovered (mirrored) opponent.
    pub ghost_affinity: i32,
}

impl EncounterConfig {
    pub const GAUGE_MAX: f64 = 100.0;
    pub const TICK_MS: u64 = 50;
    pub const GAUGE_SPEED_FACTOR: f64 = 0.15;
    pub const PLAYER_ATTACK_POWER: u32 = 25;
    pub const AI_ATTACK_POWER: u32 = 15;
    pub const PACING_DELAY_MS: u64 = 300;
    pub const FLEE_SUCCESS_CHANCE: f64 = 0.6;
    pub const DEFAULT_HEAL: u32 = 20;
    pub const VFX_DURATION_MS: u64 = 1000;
    pub const GHOST_AFFINITY: i32 = -50;

    pub fn new() -> Self {
        Self {
            gauge_max: Self::GAUGE_MAX,
            tick_ms: Self::TICK_MS,
            gauge_speed_factor: Self::GAUGE_SPEED_FACTOR,
            player_attack_power: Self::PLAYER_ATTACK_POWER,
            ai_attack_power: Self::AI_ATTACK_POWER,
            pacing_delay_ms: Self::PACING_DELAY_MS,
            flee_success_chance: Self::FLEE_SUCCESS_CHANCE,
            default_heal: Self::DEFAULT_HEAL,
            vfx_duration_ms: Self::VFX_DURATION_MS,
            ghost_affinity: Self::GHOST_AFFINITY,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn vfx_duration(&self) -> Duration {
        Duration::from_millis(self.vfx_duration_ms)
    }

    /// Gauge gained in one tick by a combatant with the given speed.
    pub fn gauge_gain(&self, speed: u32) -> f64 {
        f64::from(speed) * self.gauge_speed_factor
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}
