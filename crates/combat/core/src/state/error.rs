use super::EntityId;

/// Errors raised while mutating session state directly.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// The roster is at capacity.
    #[error("roster is full")]
    RosterFull,

    /// A combatant with this id already entered combat.
    #[error("combatant {entity} already in roster")]
    DuplicateEntity { entity: EntityId },

    /// The entity is not one of the player-side party slots.
    #[error("combatant {entity} is not a party member")]
    NotInParty { entity: EntityId },
}
