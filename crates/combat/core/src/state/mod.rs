//! Session state: combatants, party slots, turn order, guard set, and
//! target lock.
//!
//! State is owned by the [`crate::engine::CombatEngine`] and mutated only
//! through actions and animation tracks. Everything refers to combatants by
//! [`EntityId`]; the roster owns the actual records.
mod combatant;
mod common;
mod error;
mod roster;
mod turn;

pub use combatant::CombatantState;
pub use common::{EntityId, Rgba, StagePos};
pub use error::StateError;
pub use roster::RosterState;
pub use turn::TurnState;

/// Aggregate combat session state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub roster: RosterState,
    pub turn: TurnState,
    /// Whether the combat HUD is currently shown.
    pub hud_visible: bool,
}

impl CombatState {
    pub fn new() -> Self {
        Self {
            hud_visible: true,
            ..Self::default()
        }
    }

    pub fn combatant(&self, id: EntityId) -> Option<&CombatantState> {
        self.roster.combatant(id)
    }

    pub fn combatant_mut(&mut self, id: EntityId) -> Option<&mut CombatantState> {
        self.roster.combatant_mut(id)
    }

    /// Marks a combatant as guarding. Guard is dropped automatically when
    /// the combatant faints or is swapped out.
    pub fn set_guarding(&mut self, entity: EntityId, guarding: bool) {
        if let Some(combatant) = self.roster.combatant_mut(entity) {
            combatant.guarding = guarding;
        }
        if guarding {
            self.turn.guarding.insert(entity);
        } else {
            self.turn.guarding.remove(&entity);
        }
    }

    /// Removes an entity from turn order, guard set, and target lock, and
    /// drops its guard flag. The single path for faint/swap removal.
    pub fn remove_from_battle(&mut self, entity: EntityId) {
        self.turn.remove_from_battle(entity);
        if let Some(combatant) = self.roster.combatant_mut(entity) {
            combatant.guarding = false;
        }
    }

    /// Replaces `outgoing` with `incoming` in the turn order and clears
    /// guard flags and target lock for both, in one transition. The single
    /// path for swap removal, mirroring [`Self::remove_from_battle`].
    pub fn swap_in_battle(&mut self, outgoing: EntityId, incoming: EntityId) {
        self.turn.replace(outgoing, incoming);
        self.turn.guarding.remove(&outgoing);
        self.turn.guarding.remove(&incoming);
        if self.turn.target_lock == Some(outgoing) || self.turn.target_lock == Some(incoming) {
            self.turn.target_lock = None;
        }
        for id in [outgoing, incoming] {
            if let Some(combatant) = self.roster.combatant_mut(id) {
                combatant.guarding = false;
            }
        }
    }

    /// Ids of combatants currently holding a guard stance.
    pub fn guarding_entities(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.turn.guarding.iter().copied().collect();
        ids.sort();
        ids
    }
}
