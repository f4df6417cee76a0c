//! Party lifecycle actions: faint, revive, and slot swaps.

use tracing::warn;

use crate::action::{ActionError, ActionKind, ActionRun, RunCtx, RunOutcome};
use crate::events::CombatEvent;
use crate::state::EntityId;
use crate::track::FaintDirection;

/// Marks combatants fainted, removes them from the turn order, guard set,
/// and target lock in the same transition, then plays the faint sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaintAction {
    pub entities: Vec<EntityId>,
}

impl FaintAction {
    pub fn new(entities: Vec<EntityId>) -> Result<Self, ActionError> {
        if entities.is_empty() {
            return Err(ActionError::NoTargets);
        }
        Ok(Self { entities })
    }

    pub fn single(entity: EntityId) -> Self {
        Self {
            entities: vec![entity],
        }
    }
}

impl ActionRun for FaintAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Faint
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        let mut affected = Vec::with_capacity(self.entities.len());
        for &entity in &self.entities {
            if ctx.state.combatant(entity).is_none() {
                warn!(%entity, "faint target left combat, skipping");
                continue;
            }
            if let Some(combatant) = ctx.state.combatant_mut(entity) {
                combatant.faint();
            }
            ctx.state.remove_from_battle(entity);
            ctx.events.push(CombatEvent::Fainted { entity });
            affected.push(entity);
        }
        if affected.is_empty() {
            return Err(ActionError::CombatantNotFound {
                entity: self.entities[0],
            });
        }

        match ctx
            .tracks
            .start_faint(FaintDirection::Faint, &affected, ctx.config)
        {
            Ok(()) => Ok(RunOutcome::Animating),
            Err(_) => Ok(RunOutcome::Completed),
        }
    }
}

/// Brings fainted combatants back with a fixed life total and replays the
/// revive sprite sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReviveAction {
    pub entities: Vec<EntityId>,
    pub restored_life: u32,
}

impl ReviveAction {
    pub fn new(entities: Vec<EntityId>, restored_life: u32) -> Result<Self, ActionError> {
        if entities.is_empty() {
            return Err(ActionError::NoTargets);
        }
        Ok(Self {
            entities,
            restored_life,
        })
    }
}

impl ActionRun for ReviveAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Revive
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        let mut affected = Vec::with_capacity(self.entities.len());
        for &entity in &self.entities {
            let Some(combatant) = ctx.state.combatant_mut(entity) else {
                warn!(%entity, "revive target left combat, skipping");
                continue;
            };
            if !combatant.fainted {
                warn!(%entity, "revive target is not fainted, skipping");
                continue;
            }
            combatant.revive(self.restored_life);
            ctx.state.turn.schedule(entity);
            ctx.events.push(CombatEvent::Revived { entity });
            affected.push(entity);
        }
        if affected.is_empty() {
            return Err(ActionError::CombatantNotFound {
                entity: self.entities[0],
            });
        }

        match ctx
            .tracks
            .start_faint(FaintDirection::Revive, &affected, ctx.config)
        {
            Ok(()) => Ok(RunOutcome::Animating),
            Err(_) => Ok(RunOutcome::Completed),
        }
    }
}

/// Exchanges two party members' slots, clears their guard stances and any
/// target lock on either, and optionally plays the swap fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapAllyAction {
    pub outgoing: EntityId,
    pub incoming: EntityId,
    pub animate: bool,
}

impl SwapAllyAction {
    pub fn new(outgoing: EntityId, incoming: EntityId) -> Self {
        Self {
            outgoing,
            incoming,
            animate: true,
        }
    }
}

impl ActionRun for SwapAllyAction {
    fn kind(&self) -> ActionKind {
        ActionKind::SwapAlly
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        for entity in [self.outgoing, self.incoming] {
            if ctx.state.combatant(entity).is_none() {
                return Err(ActionError::CombatantNotFound { entity });
            }
        }

        ctx.state.roster.swap_slots(self.outgoing, self.incoming)?;
        ctx.state.swap_in_battle(self.outgoing, self.incoming);
        if let Ok(party) = ctx.env.party() {
            party.swap_slots(self.outgoing, self.incoming);
        }
        ctx.events.push(CombatEvent::Swapped {
            outgoing: self.outgoing,
            incoming: self.incoming,
        });

        if !self.animate {
            return Ok(RunOutcome::Completed);
        }
        match ctx
            .tracks
            .start_swap(self.outgoing, self.incoming, ctx.config)
        {
            Ok(()) => Ok(RunOutcome::Animating),
            Err(_) => Ok(RunOutcome::Completed),
        }
    }
}
