//! Animation track engine.
//!
//! A track is a finite-state timer gating turn progression on one playing
//! effect: front delay, active phase with an effect-specific completion
//! predicate, back delay, then completion. Several tracks may run
//! concurrently, but at most one per kind; starting a kind that is already
//! running is dropped, not deferred.
//!
//! Tracks never call back into the engine. [`TrackSet::update`] returns the
//! completions produced this frame and the [`crate::engine::CombatEngine`]
//! applies their resolution (secondary effects, faint sweep) before
//! progressing the queue.
mod custom;
mod faint;
mod health;
mod move_fx;
mod swap;

pub use custom::{CustomCompletion, CustomEffectFlags, CustomStart, CustomTrack};
pub use faint::{FaintCompletion, FaintDirection, FaintTrack};
pub use health::HealthBarLerp;
pub use move_fx::{MoveCompletion, MoveStart, MoveTrack};
pub use swap::{SwapCompletion, SwapTrack};

use tracing::debug;

use crate::config::CombatConfig;
use crate::env::CombatEnv;
use crate::state::CombatState;

/// Phase of a track's lifecycle. Transitions are strictly
/// `Idle → FrontDelay → Active → BackDelay → Complete`, and a completed
/// track is reset to `Idle` defaults in the same frame its completion is
/// reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackPhase {
    #[default]
    Idle,
    FrontDelay,
    Active,
    BackDelay,
    Complete,
}

/// The track kinds the engine can have in flight, one of each at most.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackKind {
    Move,
    Faint,
    Swap,
    Custom,
}

/// Errors surfaced by track scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackError {
    /// A track of this kind is already running. The new request is dropped.
    #[error("{kind} track already active")]
    Reentrancy { kind: TrackKind },
}

/// Shared front-delay / active / back-delay timer driving every track kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    front_left: f64,
    back_left: f64,
    active_elapsed: f64,
    phase: TrackPhase,
}

impl Timeline {
    /// Arms the timer. Even a zero front delay spends one frame in
    /// `FrontDelay` so the kickoff side effect fires from `update`, never
    /// from the starting action's `run`.
    pub fn start(front_delay: f64, back_delay: f64) -> Self {
        Self {
            front_left: front_delay,
            back_left: back_delay,
            active_elapsed: 0.0,
            phase: TrackPhase::FrontDelay,
        }
    }

    pub fn phase(&self) -> TrackPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TrackPhase::Idle
    }

    /// Total time spent in the active phase so far.
    pub fn active_elapsed(&self) -> f64 {
        self.active_elapsed
    }

    /// Burns front delay. Returns true on the frame the kickoff boundary
    /// is crossed; the caller fires its one-time side effect then.
    pub fn tick_front(&mut self, dt: f64) -> bool {
        self.front_left -= dt;
        if self.front_left <= 0.0 {
            self.front_left = 0.0;
            self.phase = TrackPhase::Active;
            true
        } else {
            false
        }
    }

    /// Accumulates active time; moves to back delay once the caller's
    /// completion predicate holds.
    pub fn tick_active(&mut self, dt: f64, predicate_complete: bool) {
        self.active_elapsed += dt;
        if predicate_complete {
            self.phase = TrackPhase::BackDelay;
        }
    }

    /// Burns back delay. Returns true on the frame the track completes.
    pub fn tick_back(&mut self, dt: f64) -> bool {
        self.back_left -= dt;
        if self.back_left <= 0.0 {
            self.back_left = 0.0;
            self.phase = TrackPhase::Complete;
            true
        } else {
            false
        }
    }
}

/// A track's resolution payload, handed to the engine the frame the track
/// completes.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackCompletion {
    Move(MoveCompletion),
    Faint(FaintCompletion),
    Swap(SwapCompletion),
    Custom(CustomCompletion),
}

impl TrackCompletion {
    pub fn kind(&self) -> TrackKind {
        match self {
            TrackCompletion::Move(_) => TrackKind::Move,
            TrackCompletion::Faint(_) => TrackKind::Faint,
            TrackCompletion::Swap(_) => TrackKind::Swap,
            TrackCompletion::Custom(_) => TrackKind::Custom,
        }
    }
}

/// The set of concurrently playing tracks, one slot per kind.
#[derive(Debug, Default)]
pub struct TrackSet {
    move_fx: MoveTrack,
    faint: FaintTrack,
    swap: SwapTrack,
    custom: CustomTrack,
}

impl TrackSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the standard move animation. Dropped if one is running.
    pub fn start_move(&mut self, start: MoveStart, config: &CombatConfig) -> Result<(), TrackError> {
        if !self.move_fx.is_idle() {
            debug!(kind = %TrackKind::Move, "track already active, dropping start request");
            return Err(TrackError::Reentrancy { kind: TrackKind::Move });
        }
        self.move_fx.start(start, config);
        Ok(())
    }

    /// Starts the standard faint/revive animation. Dropped if one is running.
    pub fn start_faint(
        &mut self,
        direction: FaintDirection,
        entities: &[crate::state::EntityId],
        config: &CombatConfig,
    ) -> Result<(), TrackError> {
        if !self.faint.is_idle() {
            debug!(kind = %TrackKind::Faint, "track already active, dropping start request");
            return Err(TrackError::Reentrancy { kind: TrackKind::Faint });
        }
        self.faint.start(direction, entities, config);
        Ok(())
    }

    /// Starts the standard party-swap animation. Dropped if one is running.
    pub fn start_swap(
        &mut self,
        outgoing: crate::state::EntityId,
        incoming: crate::state::EntityId,
        config: &CombatConfig,
    ) -> Result<(), TrackError> {
        if !self.swap.is_idle() {
            debug!(kind = %TrackKind::Swap, "track already active, dropping start request");
            return Err(TrackError::Reentrancy { kind: TrackKind::Swap });
        }
        self.swap.start(outgoing, incoming, config);
        Ok(())
    }

    /// Starts a custom scripted effect. Dropped if one is running.
    pub fn start_custom(
        &mut self,
        start: CustomStart,
        config: &CombatConfig,
    ) -> Result<(), TrackError> {
        if !self.custom.is_idle() {
            debug!(kind = %TrackKind::Custom, "track already active, dropping start request");
            return Err(TrackError::Reentrancy {
                kind: TrackKind::Custom,
            });
        }
        self.custom.start(start, config);
        Ok(())
    }

    /// True while any track that gates turn progression is still playing.
    pub fn any_gating(&self) -> bool {
        !self.move_fx.is_idle()
            || !self.faint.is_idle()
            || !self.swap.is_idle()
            || self.custom.is_gating()
    }

    /// True while any track, gating or not, is still playing.
    pub fn any_active(&self) -> bool {
        !self.move_fx.is_idle()
            || !self.faint.is_idle()
            || !self.swap.is_idle()
            || !self.custom.is_idle()
    }

    /// Advances every non-idle track by one frame, in fixed declaration
    /// order, and collects the completions produced.
    pub fn update(
        &mut self,
        dt: f64,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
        config: &CombatConfig,
    ) -> Vec<TrackCompletion> {
        let mut completions = Vec::new();
        if let Some(done) = self.move_fx.update(dt, state, env, config) {
            completions.push(TrackCompletion::Move(done));
        }
        if let Some(done) = self.faint.update(dt, env) {
            completions.push(TrackCompletion::Faint(done));
        }
        if let Some(done) = self.swap.update(dt, env) {
            completions.push(TrackCompletion::Swap(done));
        }
        if let Some(done) = self.custom.update(dt, state, env, config) {
            completions.push(TrackCompletion::Custom(done));
        }
        completions
    }

    /// Drops every track back to Idle defaults. Used when combat exits.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EntityId;

    #[test]
    fn timeline_walks_phases_in_order() {
        let mut t = Timeline::start(0.2, 0.1);
        assert_eq!(t.phase(), TrackPhase::FrontDelay);
        assert!(!t.tick_front(0.1));
        assert!(t.tick_front(0.1));
        assert_eq!(t.phase(), TrackPhase::Active);
        t.tick_active(0.1, false);
        assert_eq!(t.phase(), TrackPhase::Active);
        t.tick_active(0.1, true);
        assert_eq!(t.phase(), TrackPhase::BackDelay);
        assert!(t.tick_back(0.1));
        assert_eq!(t.phase(), TrackPhase::Complete);
    }

    #[test]
    fn second_start_of_same_kind_is_dropped() {
        let mut tracks = TrackSet::new();
        let config = CombatConfig::default();
        tracks
            .start_faint(FaintDirection::Faint, &[EntityId(1)], &config)
            .unwrap();
        let err = tracks
            .start_faint(FaintDirection::Faint, &[EntityId(2)], &config)
            .unwrap_err();
        assert_eq!(err, TrackError::Reentrancy { kind: TrackKind::Faint });
    }

    #[test]
    fn zero_delay_timeline_kicks_off_first_tick() {
        let mut t = Timeline::start(0.0, 0.0);
        assert!(t.tick_front(0.016));
        assert_eq!(t.phase(), TrackPhase::Active);
    }
}
