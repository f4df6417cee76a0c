//! Turn-order authority and action dispatch.
//!
//! The [`CombatEngine`] owns the action queue, the animation tracks, and
//! the session state. [`CombatEngine::progress_combat`] is the sole path
//! that advances the queue: it dequeues and runs exactly zero or one action
//! per invocation. [`CombatEngine::update`] advances the tracks each frame
//! and, once nothing gates progression, keeps calling `progress_combat`
//! until an action animates, suspends, exits, or the queue runs dry —
//! synchronous action chains drain within a single frame.
mod error;

pub use error::EngineError;

use tracing::{debug, warn};

use crate::action::{
    Action, ActionError, ActionKind, ActionQueue, FaintAction, RunCtx, RunOutcome,
};
use crate::config::CombatConfig;
use crate::env::{CombatEnv, SecondaryEffect};
use crate::events::CombatEvent;
use crate::state::{CombatState, EntityId};
use crate::track::{TrackCompletion, TrackSet};

/// Where the engine's turn-order state machine currently sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnginePhase {
    /// Combat not yet initiated.
    #[default]
    Idle,
    /// Queue may hold work; nothing is in flight.
    AwaitingAction,
    /// An action's `run` was invoked and its tracks are still playing.
    ActionRunning,
    /// Interrupted by a sub-menu, dialogue, or host pause. Queue and track
    /// state are preserved verbatim.
    Paused,
    /// The session has terminated.
    Exited,
}

/// Proof that a suspension is held; resuming consumes it. Tokens resume in
/// LIFO order, so a menu opened over a dialogue must close first.
#[derive(Debug, PartialEq, Eq)]
pub struct SuspendToken {
    id: u64,
}

#[derive(Debug)]
struct Suspension {
    id: u64,
    prior: EnginePhase,
}

/// What a [`CombatEngine::progress_combat`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Nothing could run: paused, exited, not begun, or tracks still gate.
    Blocked,
    /// The queue was empty; combat is resolved.
    Idle,
    /// One action was dequeued and ran.
    Ran(ActionKind),
    /// One action was dequeued and skipped with a recoverable error.
    Skipped(ActionKind),
    /// The dequeued action terminated the session.
    Exited,
}

/// Turn-order authority for one combat session.
pub struct CombatEngine {
    state: CombatState,
    queue: ActionQueue,
    tracks: TrackSet,
    config: CombatConfig,
    phase: EnginePhase,
    suspensions: Vec<Suspension>,
    next_suspend_id: u64,
    /// Suspension held on behalf of an open sub-menu/dialogue, together
    /// with the action kind to report completed on close.
    interface: Option<(SuspendToken, ActionKind)>,
    events: Vec<CombatEvent>,
    resolved_signaled: bool,
}

impl CombatEngine {
    pub fn new(state: CombatState, config: CombatConfig) -> Self {
        Self {
            state,
            queue: ActionQueue::new(),
            tracks: TrackSet::new(),
            config,
            phase: EnginePhase::Idle,
            suspensions: Vec::new(),
            next_suspend_id: 0,
            interface: None,
            events: Vec::new(),
            resolved_signaled: false,
        }
    }

    /// Initiates combat, moving the state machine out of `Idle`.
    pub fn begin(&mut self) {
        if self.phase == EnginePhase::Idle {
            self.phase = EnginePhase::AwaitingAction;
        }
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// True while any animation track is still playing.
    pub fn tracks_active(&self) -> bool {
        self.tracks.any_active()
    }

    /// Ids of combatants currently holding a guard stance.
    pub fn guarding_entities(&self) -> Vec<EntityId> {
        self.state.guarding_entities()
    }

    /// The entity currently locked as the pending move recipient, if any.
    pub fn target_lock(&self) -> Option<EntityId> {
        self.state.turn.target_lock
    }

    pub fn set_target_lock(&mut self, entity: Option<EntityId>) {
        self.state.turn.target_lock = entity;
    }

    pub fn set_guarding(&mut self, entity: EntityId, guarding: bool) {
        self.state.set_guarding(entity, guarding);
    }

    /// Events recorded so far, in the order they happened.
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Drains the recorded events, handing them to the host.
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Appends an action to the queue after its fail-fast precondition
    /// check. Enqueueing never runs anything.
    pub fn enqueue(&mut self, action: impl Into<Action>) -> Result<(), ActionError> {
        let action = action.into();
        action.validate(&self.state)?;
        self.queue.enqueue(action);
        self.resolved_signaled = false;
        Ok(())
    }

    /// Dequeues and runs at most one action.
    ///
    /// Invoked by [`Self::update`] once nothing gates progression, by the
    /// host's sub-menu/dialogue close path via [`Self::resume_interface`],
    /// and directly by hosts that drive the engine manually. Idempotent on
    /// an empty queue.
    pub fn progress_combat(&mut self, env: &CombatEnv<'_>) -> Progress {
        match self.phase {
            EnginePhase::Idle | EnginePhase::Paused | EnginePhase::Exited => {
                return Progress::Blocked;
            }
            EnginePhase::ActionRunning => {
                if self.tracks.any_gating() {
                    return Progress::Blocked;
                }
                self.phase = EnginePhase::AwaitingAction;
            }
            EnginePhase::AwaitingAction => {}
        }

        let Some(action) = self.queue.dequeue() else {
            if !self.resolved_signaled {
                self.resolved_signaled = true;
                debug!("action queue empty, combat resolved");
                self.events.push(CombatEvent::CombatResolved);
            }
            return Progress::Idle;
        };

        let kind = action.kind();
        self.phase = EnginePhase::ActionRunning;
        self.events.push(CombatEvent::ActionStarted { kind });

        let result = {
            let mut ctx = RunCtx {
                state: &mut self.state,
                tracks: &mut self.tracks,
                env,
                config: &self.config,
                events: &mut self.events,
            };
            action.run(&mut ctx)
        };

        match result {
            Ok(RunOutcome::Completed) => {
                self.events.push(CombatEvent::ActionCompleted { kind });
                self.phase = EnginePhase::AwaitingAction;
                Progress::Ran(kind)
            }
            Ok(RunOutcome::Animating) => {
                // Stay in ActionRunning until the tracks report complete.
                Progress::Ran(kind)
            }
            Ok(RunOutcome::Suspended) => {
                let token = self.push_suspension(EnginePhase::AwaitingAction);
                self.interface = Some((token, kind));
                Progress::Ran(kind)
            }
            Ok(RunOutcome::Exit) => {
                self.events.push(CombatEvent::ActionCompleted { kind });
                self.exit_combat();
                Progress::Exited
            }
            Err(error) => {
                warn!(kind = %kind, %error, "action failed, skipping to next");
                self.events.push(CombatEvent::ActionSkipped { kind, error });
                self.phase = EnginePhase::AwaitingAction;
                Progress::Skipped(kind)
            }
        }
    }

    /// Advances every playing track by one frame, applies the resolutions
    /// of tracks that completed, and drains the queue until something gates
    /// progression again. No-op while paused, exited, or not begun.
    pub fn update(&mut self, dt: f64, env: &CombatEnv<'_>) {
        if !matches!(
            self.phase,
            EnginePhase::AwaitingAction | EnginePhase::ActionRunning
        ) {
            return;
        }

        let completions = self.tracks.update(dt, &mut self.state, env, &self.config);
        for completion in completions {
            self.finish_track(completion);
        }

        if self.phase == EnginePhase::ActionRunning && !self.tracks.any_gating() {
            self.phase = EnginePhase::AwaitingAction;
        }

        while self.phase == EnginePhase::AwaitingAction {
            match self.progress_combat(env) {
                Progress::Ran(_) | Progress::Skipped(_) => continue,
                Progress::Blocked | Progress::Idle | Progress::Exited => break,
            }
        }
    }

    /// Freezes combat in place: track timers and the queue head stay
    /// exactly where they are until [`Self::resume`] is called with the
    /// returned token.
    pub fn suspend(&mut self) -> SuspendToken {
        let prior = match self.phase {
            EnginePhase::Paused => self
                .suspensions
                .last()
                .map(|suspension| suspension.prior)
                .unwrap_or(EnginePhase::AwaitingAction),
            phase => phase,
        };
        self.push_suspension(prior)
    }

    /// Releases the most recent suspension. Restores the pre-suspension
    /// phase once the suspension stack empties.
    pub fn resume(&mut self, token: SuspendToken) -> Result<(), EngineError> {
        let Some(suspension) = self.suspensions.pop() else {
            return Err(EngineError::NotSuspended);
        };
        if suspension.id != token.id {
            self.suspensions.push(suspension);
            return Err(EngineError::TokenMismatch);
        }
        if self.suspensions.is_empty() {
            self.phase = suspension.prior;
        }
        Ok(())
    }

    /// Host callback for a closing sub-menu or dialogue: releases the
    /// interface suspension, completes the opening action, and progresses
    /// the queue.
    pub fn resume_interface(&mut self, env: &CombatEnv<'_>) -> Result<(), EngineError> {
        let (token, kind) = self.interface.take().ok_or(EngineError::NoInterfaceOpen)?;
        self.resume(token)?;
        self.events.push(CombatEvent::ActionCompleted { kind });
        self.progress_combat(env);
        Ok(())
    }

    /// True while a sub-menu or dialogue holds progression.
    pub fn interface_open(&self) -> bool {
        self.interface.is_some()
    }

    /// Terminates the session: pending actions and tracks are dropped and
    /// per-combat state is destroyed.
    pub fn exit_combat(&mut self) {
        if self.phase == EnginePhase::Exited {
            return;
        }
        self.queue.clear();
        self.tracks.reset();
        self.suspensions.clear();
        self.interface = None;
        self.state = CombatState::new();
        self.phase = EnginePhase::Exited;
        self.events.push(CombatEvent::CombatExited);
    }

    fn push_suspension(&mut self, prior: EnginePhase) -> SuspendToken {
        let id = self.next_suspend_id;
        self.next_suspend_id += 1;
        self.suspensions.push(Suspension { id, prior });
        self.phase = EnginePhase::Paused;
        SuspendToken { id }
    }

    /// Applies a completed track's resolution: secondary effects, then the
    /// faint sweep that queues `Faint` actions for targets driven to zero.
    fn finish_track(&mut self, completion: TrackCompletion) {
        self.events.push(CombatEvent::TrackFinished {
            kind: completion.kind(),
        });
        match completion {
            TrackCompletion::Move(done) => {
                if let Some(secondary) = done.secondary {
                    self.apply_secondary(done.source, secondary, &done.targets);
                }
                self.sweep_faints(&done.targets);
            }
            TrackCompletion::Custom(done) => {
                self.sweep_faints(&done.targets);
            }
            TrackCompletion::Faint(_) | TrackCompletion::Swap(_) => {}
        }
    }

    fn apply_secondary(
        &mut self,
        source: EntityId,
        secondary: SecondaryEffect,
        targets: &[(EntityId, u32, u32)],
    ) {
        match secondary {
            SecondaryEffect::LeechLife { percent } => {
                let dealt: u32 = targets
                    .iter()
                    .map(|&(_, from, final_life)| from.saturating_sub(final_life))
                    .sum();
                let healed = dealt * percent / 100;
                if let Some(combatant) = self.state.combatant_mut(source) {
                    let life = (combatant.life + healed).min(combatant.max_life);
                    combatant.set_life(life);
                }
            }
            SecondaryEffect::BreakGuard => {
                for &(target, _, _) in targets {
                    self.state.set_guarding(target, false);
                }
            }
            SecondaryEffect::RestoreSkill { amount } => {
                if let Some(combatant) = self.state.combatant_mut(source) {
                    combatant.restore_skill(amount);
                }
            }
        }
    }

    /// Queues a `Faint` action for every target whose life just reached
    /// zero and is not yet marked fainted.
    fn sweep_faints(&mut self, targets: &[(EntityId, u32, u32)]) {
        let newly_fainted: Vec<EntityId> = targets
            .iter()
            .filter_map(|&(entity, _, final_life)| {
                if final_life > 0 {
                    return None;
                }
                let combatant = self.state.combatant(entity)?;
                (!combatant.fainted).then_some(entity)
            })
            .collect();
        if newly_fainted.is_empty() {
            return;
        }
        self.queue.enqueue(Action::Faint(FaintAction {
            entities: newly_fainted,
        }));
        self.resolved_signaled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{EndTurnAction, ToggleHudAction, UseAttackAction};
    use crate::state::CombatantState;

    fn engine_with_two() -> CombatEngine {
        let mut state = CombatState::new();
        state
            .roster
            .insert_player_side(CombatantState::new(EntityId(1), 60, 10))
            .unwrap();
        state
            .roster
            .insert(CombatantState::new(EntityId(2), 60, 10))
            .unwrap();
        state.turn.schedule(EntityId(1));
        state.turn.schedule(EntityId(2));
        let mut engine = CombatEngine::new(state, CombatConfig::without_delays());
        engine.begin();
        engine
    }

    fn started_kinds(engine: &CombatEngine) -> Vec<ActionKind> {
        engine
            .events()
            .iter()
            .filter_map(|event| match event {
                CombatEvent::ActionStarted { kind } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn progress_runs_at_most_one_action() {
        let mut engine = engine_with_two();
        engine.enqueue(ToggleHudAction { visible: false }).unwrap();
        engine.enqueue(ToggleHudAction { visible: true }).unwrap();

        let env = CombatEnv::empty();
        engine.progress_combat(&env);
        assert_eq!(started_kinds(&engine).len(), 1);
        engine.progress_combat(&env);
        assert_eq!(started_kinds(&engine).len(), 2);
    }

    #[test]
    fn update_drains_synchronous_chain_in_fifo_order() {
        let mut engine = engine_with_two();
        engine.enqueue(ToggleHudAction { visible: false }).unwrap();
        engine.enqueue(EndTurnAction).unwrap();
        engine.enqueue(ToggleHudAction { visible: true }).unwrap();

        engine.update(0.016, &CombatEnv::empty());
        assert_eq!(
            started_kinds(&engine),
            vec![
                ActionKind::ToggleHud,
                ActionKind::EndTurn,
                ActionKind::ToggleHud
            ]
        );
        assert_eq!(engine.phase(), EnginePhase::AwaitingAction);
    }

    #[test]
    fn empty_queue_progress_is_idempotent() {
        let mut engine = engine_with_two();
        let env = CombatEnv::empty();
        assert_eq!(engine.progress_combat(&env), Progress::Idle);
        assert_eq!(engine.progress_combat(&env), Progress::Idle);
        let resolved = engine
            .events()
            .iter()
            .filter(|event| matches!(event, CombatEvent::CombatResolved))
            .count();
        assert_eq!(resolved, 1);
    }

    #[test]
    fn missing_entity_skips_to_next_action() {
        let mut engine = engine_with_two();
        engine
            .enqueue(UseAttackAction {
                attack: "scratch".into(),
                source: EntityId(1),
                target: EntityId(99),
            })
            .unwrap();
        engine.enqueue(EndTurnAction).unwrap();

        engine.update(0.016, &CombatEnv::empty());
        let events = engine.events();
        assert!(events.iter().any(|event| matches!(
            event,
            CombatEvent::ActionSkipped {
                kind: ActionKind::UseAttack,
                error: ActionError::CombatantNotFound { entity: EntityId(99) },
            }
        )));
        assert!(events
            .iter()
            .any(|event| matches!(event, CombatEvent::TurnEnded { .. })));
    }

    #[test]
    fn suspensions_resume_in_lifo_order() {
        let mut engine = engine_with_two();
        let outer = engine.suspend();
        let inner = engine.suspend();
        assert_eq!(engine.phase(), EnginePhase::Paused);

        let err = engine.resume(SuspendToken { id: outer.id }).unwrap_err();
        assert_eq!(err, EngineError::TokenMismatch);

        engine.resume(inner).unwrap();
        assert_eq!(engine.phase(), EnginePhase::Paused);
        engine.resume(outer).unwrap();
        assert_eq!(engine.phase(), EnginePhase::AwaitingAction);
    }

    #[test]
    fn update_is_inert_while_paused() {
        let mut engine = engine_with_two();
        engine.enqueue(EndTurnAction).unwrap();
        let token = engine.suspend();
        engine.update(0.016, &CombatEnv::empty());
        assert!(started_kinds(&engine).is_empty());
        engine.resume(token).unwrap();
        engine.update(0.016, &CombatEnv::empty());
        assert_eq!(started_kinds(&engine), vec![ActionKind::EndTurn]);
    }

    #[test]
    fn exit_action_terminates_and_clears_backlog() {
        let mut engine = engine_with_two();
        engine.enqueue(crate::action::ExitCombatAction).unwrap();
        engine.enqueue(EndTurnAction).unwrap();

        engine.update(0.016, &CombatEnv::empty());
        assert_eq!(engine.phase(), EnginePhase::Exited);
        assert_eq!(engine.queue_len(), 0);
        assert!(engine
            .events()
            .iter()
            .any(|event| matches!(event, CombatEvent::CombatExited)));
        // The backlogged action never started.
        assert_eq!(started_kinds(&engine), vec![ActionKind::ExitCombat]);
    }
}
