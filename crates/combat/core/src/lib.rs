//! Deterministic turn-based combat orchestration.
//!
//! `combat-core` couples a command-queue scheduler (the action system) to
//! an animation synchronization layer that gates turn progression on the
//! completion of independently-timed effects. Scheduling is cooperative
//! and frame-stepped: the host calls [`CombatEngine::update`] once per
//! rendered frame, actions execute strictly in FIFO order, and any step
//! may be interrupted by a sub-menu or dialogue and resumed without losing
//! turn-order state. Host subsystems (sprites, particles, audio, menus,
//! party layout, move data) are reached through the oracle traits in
//! [`env`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod events;
pub mod state;
pub mod track;

pub use action::{
    Action, ActionError, ActionKind, ActionQueue, ActionRun, CustomEffectAction, EndTurnAction,
    ExitCombatAction, FaintAction, OpenSubMenuAction, ReadMessageAction, ReviveAction, RunCtx,
    RunOutcome, SwapAllyAction, ToggleHudAction, UseAttackAction, UseMoveAction,
};
pub use config::CombatConfig;
pub use engine::{CombatEngine, EngineError, EnginePhase, Progress, SuspendToken};
pub use env::{
    AudioOracle, CombatEnv, EffectId, Env, FadeState, FxOracle, MenuOracle, MoveEffect, MoveKind,
    MoveOracle, MoveProfile, OracleError, PartyOracle, PoseCue, SceneOracle, SecondaryEffect,
    SubMenuKind, SubMenuSpec,
};
pub use events::CombatEvent;
pub use state::{
    CombatState, CombatantState, EntityId, Rgba, RosterState, StagePos, StateError, TurnState,
};
pub use track::{
    CustomEffectFlags, FaintDirection, HealthBarLerp, Timeline, TrackError, TrackKind, TrackPhase,
    TrackSet,
};
