//! Action domain: the closed set of combat commands and their FIFO queue.
//!
//! Each variant is a payload struct implementing [`ActionRun`]; the
//! [`Action`] enum dispatches over them without a trait-object layer. An
//! action is immutable once enqueued. `run` either completes synchronously
//! (state mutation only), starts one or more animation tracks and reports
//! [`RunOutcome::Animating`], or opens a host surface and reports
//! [`RunOutcome::Suspended`].
//!
//! Malformed constructions (an empty sub-menu option list, a move with no
//! targets) fail fast in the variant constructors, not at execution time.
//! Execution-time failures are recoverable: the engine logs them and skips
//! to the next queued action.
mod error;
pub mod kinds;
mod queue;

pub use error::ActionError;
pub use kinds::{
    CustomEffectAction, EndTurnAction, ExitCombatAction, FaintAction, OpenSubMenuAction,
    ReadMessageAction, ReviveAction, SwapAllyAction, ToggleHudAction, UseAttackAction,
    UseMoveAction,
};
pub use queue::ActionQueue;

use crate::config::CombatConfig;
use crate::env::CombatEnv;
use crate::events::CombatEvent;
use crate::state::CombatState;
use crate::track::TrackSet;

/// Everything an action may touch while running.
pub struct RunCtx<'a, 'e> {
    pub state: &'a mut CombatState,
    pub tracks: &'a mut TrackSet,
    pub env: &'a CombatEnv<'e>,
    pub config: &'a CombatConfig,
    pub events: &'a mut Vec<CombatEvent>,
}

/// How an action's `run` handed control back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// State mutation only; the next action may run immediately.
    Completed,
    /// One or more gating tracks were started; progression waits for them.
    Animating,
    /// A host surface (sub-menu/dialogue) was opened; progression waits for
    /// the host's close callback.
    Suspended,
    /// The session should terminate.
    Exit,
}

/// Defines how a concrete action variant validates and mutates combat
/// state.
pub trait ActionRun {
    /// Discriminant for logging and event records.
    fn kind(&self) -> ActionKind;

    /// Enqueue-time precondition check against the current state.
    fn validate(&self, _state: &CombatState) -> Result<(), ActionError> {
        Ok(())
    }

    /// Executes the action. Never blocks; returns immediately after
    /// mutating state and/or registering tracks.
    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError>;
}

/// Discriminants for the closed action set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    UseMove,
    UseAttack,
    CustomEffect,
    Faint,
    Revive,
    SwapAlly,
    OpenSubMenu,
    ReadMessage,
    ToggleHud,
    EndTurn,
    ExitCombat,
}

macro_rules! dispatch_action {
    ($action:expr, $method:ident $(, $arg:expr)*) => {
        match $action {
            Action::UseMove(inner) => inner.$method($($arg),*),
            Action::UseAttack(inner) => inner.$method($($arg),*),
            Action::CustomEffect(inner) => inner.$method($($arg),*),
            Action::Faint(inner) => inner.$method($($arg),*),
            Action::Revive(inner) => inner.$method($($arg),*),
            Action::SwapAlly(inner) => inner.$method($($arg),*),
            Action::OpenSubMenu(inner) => inner.$method($($arg),*),
            Action::ReadMessage(inner) => inner.$method($($arg),*),
            Action::ToggleHud(inner) => inner.$method($($arg),*),
            Action::EndTurn(inner) => inner.$method($($arg),*),
            Action::ExitCombat(inner) => inner.$method($($arg),*),
        }
    };
}

/// One queued unit of combat behavior.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    UseMove(UseMoveAction),
    UseAttack(UseAttackAction),
    CustomEffect(CustomEffectAction),
    Faint(FaintAction),
    Revive(ReviveAction),
    SwapAlly(SwapAllyAction),
    OpenSubMenu(OpenSubMenuAction),
    ReadMessage(ReadMessageAction),
    ToggleHud(ToggleHudAction),
    EndTurn(EndTurnAction),
    ExitCombat(ExitCombatAction),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        dispatch_action!(self, kind)
    }

    /// Enqueue-time precondition check.
    pub fn validate(&self, state: &CombatState) -> Result<(), ActionError> {
        dispatch_action!(self, validate, state)
    }

    /// Executes the action through its variant's [`ActionRun`] impl.
    pub fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        dispatch_action!(self, run, ctx)
    }
}

impl From<UseMoveAction> for Action {
    fn from(action: UseMoveAction) -> Self {
        Self::UseMove(action)
    }
}

impl From<UseAttackAction> for Action {
    fn from(action: UseAttackAction) -> Self {
        Self::UseAttack(action)
    }
}

impl From<CustomEffectAction> for Action {
    fn from(action: CustomEffectAction) -> Self {
        Self::CustomEffect(action)
    }
}

impl From<FaintAction> for Action {
    fn from(action: FaintAction) -> Self {
        Self::Faint(action)
    }
}

impl From<ReviveAction> for Action {
    fn from(action: ReviveAction) -> Self {
        Self::Revive(action)
    }
}

impl From<SwapAllyAction> for Action {
    fn from(action: SwapAllyAction) -> Self {
        Self::SwapAlly(action)
    }
}

impl From<OpenSubMenuAction> for Action {
    fn from(action: OpenSubMenuAction) -> Self {
        Self::OpenSubMenu(action)
    }
}

impl From<ReadMessageAction> for Action {
    fn from(action: ReadMessageAction) -> Self {
        Self::ReadMessage(action)
    }
}

impl From<ToggleHudAction> for Action {
    fn from(action: ToggleHudAction) -> Self {
        Self::ToggleHud(action)
    }
}

impl From<EndTurnAction> for Action {
    fn from(action: EndTurnAction) -> Self {
        Self::EndTurn(action)
    }
}

impl From<ExitCombatAction> for Action {
    fn from(action: ExitCombatAction) -> Self {
        Self::ExitCombat(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SubMenuKind;

    #[test]
    fn empty_sub_menu_rejected_at_construction() {
        let err = OpenSubMenuAction::new(SubMenuKind::Moves, Vec::new(), None, None).unwrap_err();
        assert_eq!(err, ActionError::EmptySubMenu);
    }

    #[test]
    fn move_without_targets_rejected_at_construction() {
        use crate::env::MoveKind;
        use crate::state::EntityId;
        let err = UseMoveAction::new(MoveKind::Tackle, EntityId(1), &[]).unwrap_err();
        assert_eq!(err, ActionError::NoTargets);
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(ActionKind::UseMove.to_string(), "use_move");
        assert_eq!(ActionKind::ExitCombat.to_string(), "exit_combat");
    }
}
