//! Action construction and execution errors.
//!
//! Nothing here is fatal: execution errors cause the offending action to be
//! skipped with a log line while the queue keeps its progress, and
//! construction errors are surfaced to the caller before anything is
//! enqueued.

use crate::env::MoveKind;
use crate::state::{EntityId, StateError};

/// Errors that can occur while validating or executing a combat action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// A referenced combatant id no longer exists in the roster.
    #[error("combatant {entity} not found")]
    CombatantNotFound { entity: EntityId },

    /// The move has no registered profile.
    #[error("move {kind} has no registered profile")]
    UnknownMove { kind: MoveKind },

    /// A move or effect was constructed with no targets.
    #[error("no targets supplied")]
    NoTargets,

    /// A sub-menu was constructed with an empty option list.
    #[error("sub-menu opened with no options")]
    EmptySubMenu,

    /// A sub-menu selection index is outside the option list.
    #[error("selected option {index} outside of {len} options")]
    InvalidSubMenuOption { index: usize, len: usize },

    /// Underlying state mutation failed.
    #[error(transparent)]
    State(#[from] StateError),
}
