/// Who a log line is attributed to, for presentation styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum SpeakerClass {
    Player,
    Ally,
    Enemy,
    Info,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLogEntry {
    pub id: u64,
    pub text: String,
    pub speaker: SpeakerClass,
}

/// Append-only combat log. Entries are never edited once pushed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: SpeakerClass, text: impl Into<String>) -> &CombatLogEntry {
        let id = self.entries.len() as u64;
        self.entries.push(CombatLogEntry {
            id,
            text: text.into(),
            speaker,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    /// Entries appended after the first `from` entries.
    pub fn since(&self, from: usize) -> &[CombatLogEntry] {
        self.entries.get(from..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The whole log in chronological order, one entry per line.
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
