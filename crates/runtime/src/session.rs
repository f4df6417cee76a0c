//! Frame-stepped combat session driver.
//!
//! A [`CombatSession`] bundles the core engine with the headless stage and
//! the data-driven move registry, wiring the host-side close callbacks the
//! engine expects: timed messages auto-close, sub-menu selections resume
//! the queue, and the whole stage freezes while combat is suspended.

use combat_content::MoveRegistry;
use combat_core::{
    Action, ActionError, CombatConfig, CombatEngine, CombatEnv, CombatState, CombatantState,
    EnginePhase, EntityId, StagePos,
};
use tracing::warn;

use crate::error::{Result, RuntimeError};
use crate::stage::{HeadlessStage, OpenSurface, StageConfig};

fn stage_env<'a>(stage: &'a HeadlessStage, moves: &'a MoveRegistry) -> CombatEnv<'a> {
    CombatEnv::with_all(
        &stage.scene,
        &stage.fx,
        &stage.audio,
        &stage.menu,
        &stage.party,
        moves,
    )
}

/// One combat session: engine, simulated stage, and move data.
pub struct CombatSession {
    engine: CombatEngine,
    stage: HeadlessStage,
    moves: MoveRegistry,
}

impl CombatSession {
    pub fn builder() -> CombatSessionBuilder {
        CombatSessionBuilder::new()
    }

    pub fn engine(&self) -> &CombatEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CombatEngine {
        &mut self.engine
    }

    pub fn stage(&self) -> &HeadlessStage {
        &self.stage
    }

    /// Enqueues an action after its fail-fast precondition check.
    pub fn enqueue(&mut self, action: impl Into<Action>) -> std::result::Result<(), ActionError> {
        self.engine.enqueue(action)
    }

    /// Advances the session by one frame: stage clocks first, then the
    /// engine. Timed messages that ran out are closed before the engine
    /// update so the released queue progresses this same frame.
    pub fn step(&mut self, dt: f64) {
        let frozen = self.engine.phase() == EnginePhase::Paused;
        self.stage.advance(dt, frozen);

        if self.engine.interface_open() && self.stage.menu.message_expired() {
            self.stage.menu.close();
            let env = stage_env(&self.stage, &self.moves);
            if let Err(error) = self.engine.resume_interface(&env) {
                warn!(%error, "timed message close failed");
            }
        }

        let env = stage_env(&self.stage, &self.moves);
        self.engine.update(dt, &env);
    }

    /// Delivers a sub-menu selection. An out-of-bounds index is ignored
    /// and the menu stays open for a re-prompt.
    pub fn choose(&mut self, index: usize) -> Result<()> {
        let Some(OpenSurface::SubMenu(spec)) = self.stage.menu.open_surface() else {
            return Err(RuntimeError::NoMenuOpen);
        };
        if !spec.in_bounds(index) {
            warn!(
                index,
                options = spec.options.len(),
                "sub-menu selection out of bounds, re-prompting"
            );
            return Ok(());
        }
        self.stage.menu.record_selection(index);
        self.stage.menu.close();
        let env = stage_env(&self.stage, &self.moves);
        self.engine.resume_interface(&env)?;
        Ok(())
    }

    /// Confirms and closes the open message.
    pub fn close_message(&mut self) -> Result<()> {
        let Some(OpenSurface::Message { .. }) = self.stage.menu.open_surface() else {
            return Err(RuntimeError::NoMenuOpen);
        };
        self.stage.menu.close();
        let env = stage_env(&self.stage, &self.moves);
        self.engine.resume_interface(&env)?;
        Ok(())
    }

    /// Calls the engine's queue progression directly, as a host close
    /// callback would.
    pub fn progress_combat(&mut self) {
        let env = stage_env(&self.stage, &self.moves);
        self.engine.progress_combat(&env);
    }

    /// True when no further progress can happen without external input:
    /// combat exited, a surface awaits the player, or the queue is drained
    /// with every track idle.
    pub fn settled(&self) -> bool {
        match self.engine.phase() {
            EnginePhase::Exited => true,
            EnginePhase::Paused => self.engine.interface_open() && self.stage.menu.awaiting_input(),
            EnginePhase::AwaitingAction => {
                self.engine.queue_len() == 0 && !self.engine.tracks_active()
            }
            EnginePhase::Idle | EnginePhase::ActionRunning => false,
        }
    }

    /// Steps with a fixed `dt` until [`Self::settled`], returning the
    /// frame count, or `None` if `max_frames` was not enough.
    pub fn run_until_settled(&mut self, dt: f64, max_frames: u32) -> Option<u32> {
        for frame in 0..max_frames {
            if self.settled() {
                return Some(frame);
            }
            self.step(dt);
        }
        self.settled().then_some(max_frames)
    }
}

/// Builder wiring a roster and configs into a ready session.
pub struct CombatSessionBuilder {
    config: CombatConfig,
    stage_config: StageConfig,
    party: Vec<CombatantState>,
    foes: Vec<CombatantState>,
    placements: Vec<(EntityId, StagePos)>,
}

impl CombatSessionBuilder {
    fn new() -> Self {
        Self {
            config: CombatConfig::default(),
            stage_config: StageConfig::default(),
            party: Vec::new(),
            foes: Vec::new(),
            placements: Vec::new(),
        }
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn stage_config(mut self, stage_config: StageConfig) -> Self {
        self.stage_config = stage_config;
        self
    }

    /// Adds a player-side party member; insertion order is slot order.
    pub fn party_member(mut self, combatant: CombatantState) -> Self {
        self.party.push(combatant);
        self
    }

    /// Adds an opposing combatant.
    pub fn foe(mut self, combatant: CombatantState) -> Self {
        self.foes.push(combatant);
        self
    }

    pub fn place(mut self, entity: EntityId, at: StagePos) -> Self {
        self.placements.push((entity, at));
        self
    }

    /// Loads move data, assembles the roster, seeds the turn order
    /// (party first, then foes), and initiates combat.
    pub fn build(self) -> Result<CombatSession> {
        let moves = MoveRegistry::load()?;

        let mut state = CombatState::new();
        let mut order = Vec::new();
        for combatant in self.party {
            order.push(combatant.id);
            state.roster.insert_player_side(combatant)?;
        }
        for combatant in self.foes {
            order.push(combatant.id);
            state.roster.insert(combatant)?;
        }
        for entity in order {
            state.turn.schedule(entity);
        }

        let stage = HeadlessStage::new(&self.stage_config);
        for (entity, at) in self.placements {
            stage.scene.place(entity, at);
        }

        let mut engine = CombatEngine::new(state, self.config);
        engine.begin();

        Ok(CombatSession {
            engine,
            stage,
            moves,
        })
    }
}
