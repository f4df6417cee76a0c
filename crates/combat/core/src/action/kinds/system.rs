//! Turn-flow actions: ending the current turn and leaving combat.

use tracing::debug;

use crate::action::{ActionError, ActionKind, ActionRun, RunCtx, RunOutcome};
use crate::events::CombatEvent;

/// Pops the current turn-order head, handing the round to the next
/// combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnAction;

impl ActionRun for EndTurnAction {
    fn kind(&self) -> ActionKind {
        ActionKind::EndTurn
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        match ctx.state.turn.end_turn() {
            Some(entity) => ctx.events.push(CombatEvent::TurnEnded { entity }),
            None => debug!("end turn with empty turn order"),
        }
        Ok(RunOutcome::Completed)
    }
}

/// Terminates the combat session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitCombatAction;

impl ActionRun for ExitCombatAction {
    fn kind(&self) -> ActionKind {
        ActionKind::ExitCombat
    }

    fn run(&self, _ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        Ok(RunOutcome::Exit)
    }
}
