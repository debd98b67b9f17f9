//! Character pool implementing [`encounter_core::RosterPool`].
use encounter_content::PoolSpec;
use encounter_core::{CharacterRecord, PoolCategory, RosterPool};

/// RosterPool implementation over an in-memory [`PoolSpec`]
#[derive(Clone, Debug, Default)]
pub struct RosterPoolImpl {
    pool: PoolSpec,
}

impl RosterPoolImpl {
    pub fn new(pool: PoolSpec) -> Self {
        Self { pool }
    }

    /// Add a record to `category`
    pub fn add_record(&mut self, category: PoolCategory, record: CharacterRecord) {
        self.pool.category_mut(category).push(record);
    }
}

impl From<PoolSpec> for RosterPoolImpl {
    fn from(pool: PoolSpec) -> Self {
        Self::new(pool)
    }
}

impl RosterPool for RosterPoolImpl {
    fn by_id(&self, category: PoolCategory, id: &str) -> Option<CharacterRecord> {
        self.pool
            .category(category)
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    fn by_name(&self, category: PoolCategory, name: &str) -> Option<CharacterRecord> {
        self.pool
            .category(category)
            .iter()
            .find(|record| record.name == name)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> CharacterRecord {
        CharacterRecord {
            id: id.into(),
            name: name.into(),
            hp: None,
            max_hp: 30,
            mp: None,
            max_mp: 0,
            attack: 8,
            defense: 2,
            speed: 9,
            realm: None,
            affinity: None,
            status_effects: Vec::new(),
        }
    }

    #[test]
    fn opponents_resolve_by_id_before_name() {
        let mut pool = RosterPoolImpl::default();
        pool.add_record(PoolCategory::Npcs, record("li", "Wolf"));
        pool.add_record(PoolCategory::Bonded, record("wolf", "Li"));

        assert_eq!(pool.opponent("wolf").unwrap().id, "wolf");
        assert_eq!(pool.opponent("Wolf").unwrap().id, "li");
        assert!(pool.opponent("nobody").is_none());
    }

    #[test]
    fn companions_ignore_enemies_and_names() {
        let mut pool = RosterPoolImpl::default();
        pool.add_record(PoolCategory::Enemies, record("imp", "Imp"));
        pool.add_record(PoolCategory::Companions, record("mei", "Mei"));

        assert!(pool.companion("imp").is_none());
        assert!(pool.companion("Mei").is_none());
        assert_eq!(pool.companion("mei").unwrap().name, "Mei");
    }
}
