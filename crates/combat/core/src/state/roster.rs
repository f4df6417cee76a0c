use arrayvec::ArrayVec;

use super::error::StateError;
use super::{CombatantState, EntityId};
use crate::config::CombatConfig;

/// All combatants participating in the session, plus the ordered
/// player-side party slots.
///
/// Combatants are created when an entity enters combat and destroyed when
/// the session exits; the roster owns them and everything else refers to
/// them by [`EntityId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterState {
    combatants: ArrayVec<CombatantState, { CombatConfig::MAX_COMBATANTS }>,
    /// Player-side party ordering; slot 0 is the on-point member.
    player_slots: ArrayVec<EntityId, { CombatConfig::MAX_PARTY_SLOTS }>,
}

impl RosterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant to the session.
    pub fn insert(&mut self, combatant: CombatantState) -> Result<(), StateError> {
        if self.combatant(combatant.id).is_some() {
            return Err(StateError::DuplicateEntity { entity: combatant.id });
        }
        self.combatants
            .try_push(combatant)
            .map_err(|_| StateError::RosterFull)
    }

    /// Adds a player-side combatant and appends it to the party slots.
    pub fn insert_player_side(&mut self, combatant: CombatantState) -> Result<(), StateError> {
        let id = combatant.id;
        self.insert(combatant)?;
        self.player_slots
            .try_push(id)
            .map_err(|_| StateError::RosterFull)
    }

    pub fn combatant(&self, id: EntityId) -> Option<&CombatantState> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: EntityId) -> Option<&mut CombatantState> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatantState> {
        self.combatants.iter()
    }

    pub fn player_slots(&self) -> &[EntityId] {
        &self.player_slots
    }

    /// Exchanges the party slots holding the two given members.
    ///
    /// Both must be player-side; slot order for everyone else is untouched.
    pub fn swap_slots(&mut self, a: EntityId, b: EntityId) -> Result<(), StateError> {
        let ia = self
            .player_slots
            .iter()
            .position(|&id| id == a)
            .ok_or(StateError::NotInParty { entity: a })?;
        let ib = self
            .player_slots
            .iter()
            .position(|&id| id == b)
            .ok_or(StateError::NotInParty { entity: b })?;
        self.player_slots.swap(ia, ib);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_reorders_player_slots_only() {
        let mut roster = RosterState::new();
        roster
            .insert_player_side(CombatantState::new(EntityId(0), 60, 10))
            .unwrap();
        roster
            .insert_player_side(CombatantState::new(EntityId(1), 55, 8))
            .unwrap();
        roster
            .insert(CombatantState::new(EntityId(7), 40, 0))
            .unwrap();

        roster.swap_slots(EntityId(0), EntityId(1)).unwrap();
        assert_eq!(roster.player_slots(), &[EntityId(1), EntityId(0)]);

        let err = roster.swap_slots(EntityId(0), EntityId(7)).unwrap_err();
        assert_eq!(err, StateError::NotInParty { entity: EntityId(7) });
    }

    #[test]
    fn duplicate_insert_rejected() {
        let mut roster = RosterState::new();
        roster
            .insert(CombatantState::new(EntityId(2), 10, 0))
            .unwrap();
        assert!(matches!(
            roster.insert(CombatantState::new(EntityId(2), 10, 0)),
            Err(StateError::DuplicateEntity { .. })
        ));
    }
}
