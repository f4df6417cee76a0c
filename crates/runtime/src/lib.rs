//! Synchronous session driver for the combat engine.
//!
//! This crate wires the core engine to deterministic headless collaborator
//! implementations and a scripted scenario runner. Consumers embed
//! [`CombatSession`] and call [`CombatSession::step`] once per frame; the
//! session handles the host-side close callbacks (timed messages, sub-menu
//! selections) the engine contracts require.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the driver and builder
//! - [`stage`] provides the simulated host subsystems
//! - [`scenario`] replays scripted fights for tests and demos
mod error;
pub mod scenario;
pub mod session;
pub mod stage;

pub use error::{Result, RuntimeError};
pub use scenario::{Scenario, ScriptStep};
pub use session::{CombatSession, CombatSessionBuilder};
pub use stage::{
    HeadlessFx, HeadlessScene, HeadlessStage, OpenSurface, RecordingAudio, RecordingMenu,
    RecordingParty, StageConfig,
};
