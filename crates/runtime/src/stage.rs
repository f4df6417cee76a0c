//! Headless stage: deterministic stand-ins for the host subsystems.
//!
//! Every oracle here simulates its real counterpart with plain timers so a
//! full combat session can run without a renderer or audio device: poses
//! and faint sequences count down, fades ramp out then in, particles expire
//! after a TTL, and audio/party calls are recorded for inspection. Oracle
//! methods take `&self`, so the timers live behind `RefCell`/`Cell`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use combat_core::{
    AudioOracle, EffectId, EntityId, FadeState, FxOracle, MenuOracle, PartyOracle, PoseCue, Rgba,
    SceneOracle, StagePos, SubMenuSpec,
};

/// Timing knobs for the simulated stage.
#[derive(Clone, Debug, PartialEq)]
pub struct StageConfig {
    /// Seconds an attack/hurt pose plays.
    pub pose_duration: f64,
    /// Seconds a faint or revive sprite sequence plays.
    pub faint_duration: f64,
    /// Seconds each half of a fade cycle (out, then in) takes.
    pub fade_half_duration: f64,
    /// Seconds a particle burst stays alive.
    pub particle_ttl: f64,
    /// Seconds a non-interactive message stays open before auto-closing.
    pub message_hold: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            pose_duration: 0.6,
            faint_duration: 0.8,
            fade_half_duration: 0.3,
            particle_ttl: 0.5,
            message_hold: 0.75,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FadeTimer {
    out_left: f64,
    in_left: f64,
}

/// Simulated entity store: positions plus pose/faint/fade timers.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    pose_duration: f64,
    faint_duration: f64,
    fade_half_duration: f64,
    positions: RefCell<HashMap<EntityId, StagePos>>,
    poses: RefCell<HashMap<EntityId, f64>>,
    faints: RefCell<HashMap<EntityId, f64>>,
    fades: RefCell<HashMap<EntityId, FadeTimer>>,
}

impl HeadlessScene {
    fn new(config: &StageConfig) -> Self {
        Self {
            pose_duration: config.pose_duration,
            faint_duration: config.faint_duration,
            fade_half_duration: config.fade_half_duration,
            ..Self::default()
        }
    }

    /// Places a combatant's sprite on the simulated stage.
    pub fn place(&self, entity: EntityId, at: StagePos) {
        self.positions.borrow_mut().insert(entity, at);
    }

    fn advance(&self, dt: f64) {
        for remaining in self.poses.borrow_mut().values_mut() {
            *remaining -= dt;
        }
        for remaining in self.faints.borrow_mut().values_mut() {
            *remaining -= dt;
        }
        for fade in self.fades.borrow_mut().values_mut() {
            if fade.out_left > 0.0 {
                fade.out_left -= dt;
            } else if fade.in_left > 0.0 {
                fade.in_left -= dt;
            }
        }
    }
}

impl SceneOracle for HeadlessScene {
    fn position(&self, entity: EntityId) -> StagePos {
        self.positions
            .borrow()
            .get(&entity)
            .copied()
            .unwrap_or(StagePos::ORIGIN)
    }

    fn play_pose(&self, entity: EntityId, _cue: PoseCue) {
        self.poses.borrow_mut().insert(entity, self.pose_duration);
    }

    fn pose_finished(&self, entity: EntityId) -> bool {
        self.poses
            .borrow()
            .get(&entity)
            .is_none_or(|remaining| *remaining <= 0.0)
    }

    fn play_faint(&self, entity: EntityId) {
        self.faints.borrow_mut().insert(entity, self.faint_duration);
    }

    fn play_revive(&self, entity: EntityId) {
        self.faints.borrow_mut().insert(entity, self.faint_duration);
    }

    fn faint_sequence_finished(&self, entity: EntityId) -> bool {
        self.faints
            .borrow()
            .get(&entity)
            .is_none_or(|remaining| *remaining <= 0.0)
    }

    fn begin_fade(&self, entity: EntityId) {
        self.fades.borrow_mut().insert(
            entity,
            FadeTimer {
                out_left: self.fade_half_duration,
                in_left: self.fade_half_duration,
            },
        );
    }

    fn fade_state(&self, entity: EntityId) -> FadeState {
        match self.fades.borrow().get(&entity) {
            None => FadeState::Neutral,
            Some(fade) if fade.out_left > 0.0 => FadeState::FadingOut,
            Some(fade) if fade.in_left > 0.0 => FadeState::FadingIn,
            Some(_) => FadeState::Neutral,
        }
    }
}

/// Simulated particle subsystem with TTL-based effect lifetimes.
#[derive(Debug, Default)]
pub struct HeadlessFx {
    ttl: f64,
    next_id: Cell<u64>,
    effects: RefCell<HashMap<u64, f64>>,
    spawned: RefCell<Vec<(StagePos, Rgba)>>,
}

impl HeadlessFx {
    fn new(config: &StageConfig) -> Self {
        Self {
            ttl: config.particle_ttl,
            ..Self::default()
        }
    }

    /// Every burst spawned so far, for inspection.
    pub fn spawned(&self) -> Vec<(StagePos, Rgba)> {
        self.spawned.borrow().clone()
    }

    fn advance(&self, dt: f64) {
        let mut effects = self.effects.borrow_mut();
        for remaining in effects.values_mut() {
            *remaining -= dt;
        }
        effects.retain(|_, remaining| *remaining > 0.0);
    }
}

impl FxOracle for HeadlessFx {
    fn spawn_burst(&self, at: StagePos, color: Rgba, _size: f32) -> EffectId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.effects.borrow_mut().insert(id, self.ttl);
        self.spawned.borrow_mut().push((at, color));
        EffectId(id)
    }

    fn effect_alive(&self, id: EffectId) -> bool {
        self.effects.borrow().contains_key(&id.0)
    }
}

/// Records every sound cue the engine plays.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    played: RefCell<Vec<String>>,
}

impl RecordingAudio {
    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }
}

impl AudioOracle for RecordingAudio {
    fn play_sound(&self, name: &str) {
        self.played.borrow_mut().push(name.to_owned());
    }
}

/// The surface the menu oracle currently has open, if any.
#[derive(Clone, Debug)]
pub enum OpenSurface {
    SubMenu(SubMenuSpec),
    Message {
        text: String,
        interactive: bool,
        hold_left: f64,
    },
}

/// Simulated sub-menu/dialogue surface. Sub-menus and interactive
/// messages wait for the session's input calls; plain messages auto-close
/// once their hold timer runs out.
#[derive(Debug, Default)]
pub struct RecordingMenu {
    message_hold: f64,
    open: RefCell<Option<OpenSurface>>,
    hud_visible: Cell<bool>,
    selections: RefCell<Vec<usize>>,
}

impl RecordingMenu {
    fn new(config: &StageConfig) -> Self {
        Self {
            message_hold: config.message_hold,
            hud_visible: Cell::new(true),
            ..Self::default()
        }
    }

    pub fn open_surface(&self) -> Option<OpenSurface> {
        self.open.borrow().clone()
    }

    pub fn hud_visible(&self) -> bool {
        self.hud_visible.get()
    }

    /// Indices the player picked, in order.
    pub fn selections(&self) -> Vec<usize> {
        self.selections.borrow().clone()
    }

    /// True while the open surface needs player input to close.
    pub fn awaiting_input(&self) -> bool {
        match &*self.open.borrow() {
            Some(OpenSurface::SubMenu(_)) => true,
            Some(OpenSurface::Message { interactive, .. }) => *interactive,
            None => false,
        }
    }

    /// True once a timed message has exhausted its hold.
    pub fn message_expired(&self) -> bool {
        matches!(
            &*self.open.borrow(),
            Some(OpenSurface::Message {
                interactive: false,
                hold_left,
                ..
            }) if *hold_left <= 0.0
        )
    }

    pub(crate) fn record_selection(&self, index: usize) {
        self.selections.borrow_mut().push(index);
    }

    pub(crate) fn close(&self) {
        *self.open.borrow_mut() = None;
    }

    fn advance(&self, dt: f64) {
        if let Some(OpenSurface::Message {
            interactive: false,
            hold_left,
            ..
        }) = &mut *self.open.borrow_mut()
        {
            *hold_left -= dt;
        }
    }
}

impl MenuOracle for RecordingMenu {
    fn open_sub_menu(&self, spec: &SubMenuSpec) {
        *self.open.borrow_mut() = Some(OpenSurface::SubMenu(spec.clone()));
    }

    fn open_message(&self, text: &str, interactive: bool) {
        *self.open.borrow_mut() = Some(OpenSurface::Message {
            text: text.to_owned(),
            interactive,
            hold_left: self.message_hold,
        });
    }

    fn set_hud_visible(&self, visible: bool) {
        self.hud_visible.set(visible);
    }
}

/// Records party slot swaps requested by the engine.
#[derive(Debug, Default)]
pub struct RecordingParty {
    swaps: RefCell<Vec<(EntityId, EntityId)>>,
}

impl RecordingParty {
    pub fn swaps(&self) -> Vec<(EntityId, EntityId)> {
        self.swaps.borrow().clone()
    }
}

impl PartyOracle for RecordingParty {
    fn swap_slots(&self, a: EntityId, b: EntityId) {
        self.swaps.borrow_mut().push((a, b));
    }
}

/// The full simulated host, one field per oracle.
#[derive(Debug)]
pub struct HeadlessStage {
    pub scene: HeadlessScene,
    pub fx: HeadlessFx,
    pub audio: RecordingAudio,
    pub menu: RecordingMenu,
    pub party: RecordingParty,
}

impl HeadlessStage {
    pub fn new(config: &StageConfig) -> Self {
        Self {
            scene: HeadlessScene::new(config),
            fx: HeadlessFx::new(config),
            audio: RecordingAudio::default(),
            menu: RecordingMenu::new(config),
            party: RecordingParty::default(),
        }
    }

    /// Advances the simulated clocks by one frame. While `frozen`, scene
    /// and particle timers hold still (the host pauses the whole stage with
    /// combat) but open message timers keep counting so timed dialogue can
    /// release the engine again.
    pub fn advance(&self, dt: f64, frozen: bool) {
        if !frozen {
            self.scene.advance(dt);
            self.fx.advance(dt);
        }
        self.menu.advance(dt);
    }
}

impl Default for HeadlessStage {
    fn default() -> Self {
        Self::new(&StageConfig::default())
    }
}
