#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use encounter_core::{
    CharacterRecord, Dice, EncounterConfig, EncounterRequest, PoolCategory, ProtagonistSheet,
};
use runtime::{Event, RosterPoolImpl, RuntimeConfig};
use tokio::sync::broadcast;

pub fn protagonist(hp: u32, attack: u32, speed: u32) -> ProtagonistSheet {
    ProtagonistSheet {
        id: "hero".into(),
        name: "Lin".into(),
        hp,
        max_hp: 100,
        mp: 10,
        max_mp: 10,
        attack,
        defense: 5,
        speed,
        status_effects: Vec::new(),
        realm: None,
    }
}

pub fn enemy(id: &str, name: &str, hp: u32, attack: u32, speed: u32) -> CharacterRecord {
    CharacterRecord {
        id: id.into(),
        name: name.into(),
        hp: Some(hp),
        max_hp: hp,
        mp: None,
        max_mp: 0,
        attack,
        defense: 5,
        speed,
        realm: None,
        affinity: None,
        status_effects: Vec::new(),
    }
}

pub fn request(protagonist: ProtagonistSheet, opponents: &[&str]) -> EncounterRequest {
    EncounterRequest {
        protagonist,
        companion_ids: Vec::new(),
        opponent_refs: opponents.iter().map(|s| s.to_string()).collect(),
        inventory: Vec::new(),
    }
}

pub fn pool(enemies: Vec<CharacterRecord>) -> RosterPoolImpl {
    let mut pool = RosterPoolImpl::default();
    for record in enemies {
        pool.add_record(PoolCategory::Enemies, record);
    }
    pool
}

/// Default tuning, but attacks deal the raw stat difference.
pub fn raw_damage_config() -> RuntimeConfig {
    RuntimeConfig {
        rng_seed: Some(7),
        ..RuntimeConfig::default()
    }
    .with_encounter(EncounterConfig {
        player_attack_power: 0,
        ..EncounterConfig::default()
    })
}

/// Dice returning scripted unit rolls; picks always choose index 0.
pub struct ScriptedDice(pub VecDeque<f64>);

impl ScriptedDice {
    pub fn new(rolls: &[f64]) -> Self {
        Self(rolls.iter().copied().collect())
    }
}

impl Dice for ScriptedDice {
    fn roll_unit(&mut self) -> f64 {
        self.0.pop_front().unwrap_or(0.0)
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Receives the next event matching `filter`, skipping others.
pub async fn next_matching<T>(
    rx: &mut broadcast::Receiver<Event>,
    mut filter: impl FnMut(Event) -> Option<T>,
) -> T {
    let wait = async {
        loop {
            let event = rx.recv().await.expect("event stream closed");
            if let Some(found) = filter(event) {
                return found;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(600), wait)
        .await
        .expect("timed out waiting for event")
}
