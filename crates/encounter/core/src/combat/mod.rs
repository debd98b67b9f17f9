//! Effect resolution.
//!
//! Pure functions computing one attack or heal against one target. The
//! engine calls [`resolve_effect`] only while it holds the turn; pacing
//! around the mutation is the runtime's job.
//!
//! - `calculate_damage`: `max(1, base_power + attack - defense)`
//! - `apply_damage` / `apply_heal`: HP updates clamped to `[0, max_hp]`
//! - `resolve_effect`: mutate the target, append a log line, describe the cue

mod effect;
mod resolve;

pub use effect::{Effect, EffectKind, Targeting, VisualCue, VisualKind};
pub use resolve::{EffectApplied, apply_damage, apply_heal, calculate_damage, resolve_effect};
