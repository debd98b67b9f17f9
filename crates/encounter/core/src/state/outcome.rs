/// Encounter result. Once it leaves `InProgress` it never changes again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum CombatOutcome {
    #[default]
    InProgress,
    Victory,
    Defeat,
    Escaped,
}

impl CombatOutcome {
    pub const fn is_final(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Marker bumped whenever the outcome is set.
///
/// In-flight resolutions carry the epoch they were started under and are
/// discarded if it no longer matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epoch(pub u64);

impl Epoch {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}
