use crate::action::{ActionError, ActionKind};
use crate::state::EntityId;
use crate::track::TrackKind;

/// Synchronous run-log record emitted by the engine.
///
/// The event list is the authoritative observation channel for hosts and
/// tests: action execution order, skips, track completions, and session
/// lifecycle all appear here in the order they happened.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    ActionStarted { kind: ActionKind },
    ActionCompleted { kind: ActionKind },
    ActionSkipped { kind: ActionKind, error: ActionError },
    TrackFinished { kind: TrackKind },
    Fainted { entity: EntityId },
    Revived { entity: EntityId },
    Swapped { outgoing: EntityId, incoming: EntityId },
    TurnEnded { entity: EntityId },
    HudToggled { visible: bool },
    /// The queue ran dry; combat is resolved until something is enqueued.
    CombatResolved,
    CombatExited,
}
