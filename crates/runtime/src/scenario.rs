//! Scripted combat scenarios.
//!
//! A scenario is data: a roster-independent list of steps applied to a
//! session, letting the demo binary and integration tests drive identical
//! fights. Between steps the session runs until it settles, so each step
//! observes a quiescent engine.

use combat_core::{Action, CombatEvent, EntityId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, RuntimeError};
use crate::session::CombatSession;

/// One scripted input to the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScriptStep {
    /// Enqueue an action.
    Enqueue(Action),
    /// Pick a sub-menu option.
    Choose(usize),
    /// Confirm the open message.
    CloseMessage,
    /// Freeze combat for a number of frames, as a host dialogue overlay
    /// would, then resume.
    Pause { frames: u32 },
    /// Put a combatant into (or out of) the guard stance.
    SetGuard { entity: EntityId, guarding: bool },
    /// Set or clear the target lock.
    LockTarget { entity: Option<EntityId> },
}

/// A named, replayable combat script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Fixed frame step used while settling between script steps.
    pub dt: f64,
    /// Frames allowed per settle before the scenario counts as stalled.
    pub settle_budget: u32,
    pub steps: Vec<ScriptStep>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, steps: Vec<ScriptStep>) -> Self {
        Self {
            name: name.into(),
            dt: 0.1,
            settle_budget: 512,
            steps,
        }
    }

    /// Applies every step to the session, settling in between, and returns
    /// the accumulated event log.
    pub fn run(&self, session: &mut CombatSession) -> Result<Vec<CombatEvent>> {
        info!(name = %self.name, steps = self.steps.len(), "running scenario");
        self.settle(session)?;
        for step in &self.steps {
            match step {
                ScriptStep::Enqueue(action) => {
                    session.enqueue(action.clone())?;
                }
                ScriptStep::Choose(index) => session.choose(*index)?,
                ScriptStep::CloseMessage => session.close_message()?,
                ScriptStep::Pause { frames } => {
                    let token = session.engine_mut().suspend();
                    for _ in 0..*frames {
                        session.step(self.dt);
                    }
                    session.engine_mut().resume(token)?;
                }
                ScriptStep::SetGuard { entity, guarding } => {
                    session.engine_mut().set_guarding(*entity, *guarding);
                }
                ScriptStep::LockTarget { entity } => {
                    session.engine_mut().set_target_lock(*entity);
                }
            }
            self.settle(session)?;
        }
        Ok(session.engine_mut().take_events())
    }

    fn settle(&self, session: &mut CombatSession) -> Result<()> {
        session
            .run_until_settled(self.dt, self.settle_budget)
            .map(|_| ())
            .ok_or_else(|| RuntimeError::Stalled {
                name: self.name.clone(),
                frames: self.settle_budget,
            })
    }
}
