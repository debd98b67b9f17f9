use super::{Combatant, CombatantId, Faction};

/// Ordered encounter roster: `[protagonist, ...allies, ...opponents]`.
///
/// Order is fixed at creation and doubles as the scheduler's tie-break order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    members: Vec<Combatant>,
}

impl Roster {
    /// Builds a roster. `protagonist` always lands at position 0.
    pub fn new(
        protagonist: Combatant,
        allies: impl IntoIterator<Item = Combatant>,
        opponents: impl IntoIterator<Item = Combatant>,
    ) -> Self {
        let mut members = vec![protagonist];
        members.extend(allies);
        members.extend(opponents);
        Self { members }
    }

    pub fn protagonist(&self) -> &Combatant {
        &self.members[0]
    }

    pub fn get(&self, id: &CombatantId) -> Option<&Combatant> {
        self.members.iter().find(|c| c.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &CombatantId) -> Option<&mut Combatant> {
        self.members.iter_mut().find(|c| c.id() == id)
    }

    pub fn position(&self, id: &CombatantId) -> Option<usize> {
        self.members.iter().position(|c| c.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.members.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.members.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self, faction: Faction) -> impl Iterator<Item = &Combatant> {
        self.members.iter().filter(move |c| c.faction() == faction)
    }

    pub fn living(&self, faction: Faction) -> impl Iterator<Item = &Combatant> {
        self.members(faction).filter(|c| c.is_alive())
    }

    /// True when every member of `faction` is at 0 HP.
    pub fn is_wiped(&self, faction: Faction) -> bool {
        self.living(faction).next().is_none()
    }

    /// Player-side members other than the protagonist.
    pub fn allies(&self) -> impl Iterator<Item = &Combatant> {
        self.members(Faction::PlayerSide).filter(|c| !c.is_protagonist())
    }

    pub fn opponents(&self) -> impl Iterator<Item = &Combatant> {
        self.members(Faction::OpponentSide)
    }

    pub fn to_vec(&self) -> Vec<Combatant> {
        self.members.clone()
    }
}
