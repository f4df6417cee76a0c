//! Offensive and scripted-effect actions.

use arrayvec::ArrayVec;
use tracing::warn;

use crate::action::{ActionError, ActionKind, ActionRun, RunCtx, RunOutcome};
use crate::config::CombatConfig;
use crate::env::MoveKind;
use crate::state::{EntityId, Rgba};
use crate::track::{CustomEffectFlags, CustomStart, HealthBarLerp, MoveStart};

/// Executes a chosen move: resolves final life per target, then starts the
/// standard move animation that carries the visible damage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseMoveAction {
    pub move_kind: MoveKind,
    pub source: EntityId,
    pub targets: ArrayVec<EntityId, { CombatConfig::MAX_TRACK_TARGETS }>,
}

impl UseMoveAction {
    pub fn new(
        move_kind: MoveKind,
        source: EntityId,
        targets: &[EntityId],
    ) -> Result<Self, ActionError> {
        if targets.is_empty() {
            return Err(ActionError::NoTargets);
        }
        let mut bounded = ArrayVec::new();
        for &target in targets.iter().take(CombatConfig::MAX_TRACK_TARGETS) {
            bounded.push(target);
        }
        Ok(Self {
            move_kind,
            source,
            targets: bounded,
        })
    }
}

impl ActionRun for UseMoveAction {
    fn kind(&self) -> ActionKind {
        ActionKind::UseMove
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        let profile = ctx
            .env
            .moves()
            .ok()
            .and_then(|moves| moves.profile(self.move_kind))
            .ok_or(ActionError::UnknownMove {
                kind: self.move_kind,
            })?;

        if ctx.state.combatant(self.source).is_none() {
            return Err(ActionError::CombatantNotFound {
                entity: self.source,
            });
        }

        let mut lerps = Vec::with_capacity(self.targets.len());
        for &target in &self.targets {
            match ctx.state.combatant(target) {
                Some(combatant) => lerps.push(HealthBarLerp::new(
                    target,
                    combatant.life,
                    profile.final_life(combatant.life, combatant.max_life, combatant.guarding),
                )),
                None => warn!(%target, "move target left combat, skipping"),
            }
        }
        if lerps.is_empty() {
            return Err(ActionError::CombatantNotFound {
                entity: self.targets[0],
            });
        }

        let start = MoveStart {
            source: self.source,
            sp_cost: profile.sp_cost,
            sound: profile.sound.clone(),
            color: profile.color,
            secondary: profile.secondary,
            lerps,
        };
        match ctx.tracks.start_move(start, ctx.config) {
            Ok(()) => Ok(RunOutcome::Animating),
            // A move animation is already in flight: the request is dropped
            // and this action resolves without visible effect.
            Err(_) => Ok(RunOutcome::Completed),
        }
    }
}

/// Reserved effect hook for raw attacks. Validates its references and
/// completes without touching state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseAttackAction {
    pub attack: String,
    pub source: EntityId,
    pub target: EntityId,
}

impl ActionRun for UseAttackAction {
    fn kind(&self) -> ActionKind {
        ActionKind::UseAttack
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        for entity in [self.source, self.target] {
            if ctx.state.combatant(entity).is_none() {
                return Err(ActionError::CombatantNotFound { entity });
            }
        }
        Ok(RunOutcome::Completed)
    }
}

/// Generic scripted visual/audio effect with optional life/skill
/// resolution, driven by the custom track.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomEffectAction {
    pub entities: Vec<EntityId>,
    pub final_life: Vec<(EntityId, u32)>,
    pub final_skill: Vec<(EntityId, u32)>,
    pub color: Rgba,
    pub sound: Option<String>,
    pub flags: CustomEffectFlags,
}

impl CustomEffectAction {
    pub fn new(entities: Vec<EntityId>) -> Result<Self, ActionError> {
        if entities.is_empty() {
            return Err(ActionError::NoTargets);
        }
        Ok(Self {
            entities,
            final_life: Vec::new(),
            final_skill: Vec::new(),
            color: Rgba::WHITE,
            sound: None,
            flags: CustomEffectFlags::default(),
        })
    }

    pub fn with_final_life(mut self, final_life: Vec<(EntityId, u32)>) -> Self {
        self.final_life = final_life;
        self
    }

    pub fn with_final_skill(mut self, final_skill: Vec<(EntityId, u32)>) -> Self {
        self.final_skill = final_skill;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn with_flags(mut self, flags: CustomEffectFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl ActionRun for CustomEffectAction {
    fn kind(&self) -> ActionKind {
        ActionKind::CustomEffect
    }

    fn validate(&self, _state: &crate::state::CombatState) -> Result<(), ActionError> {
        if self.entities.is_empty() {
            return Err(ActionError::NoTargets);
        }
        Ok(())
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        if !self
            .entities
            .iter()
            .any(|&entity| ctx.state.combatant(entity).is_some())
        {
            return Err(ActionError::CombatantNotFound {
                entity: self.entities[0],
            });
        }

        let gates = self.flags.contains(CustomEffectFlags::WAIT);
        let start = CustomStart {
            entities: self.entities.clone(),
            final_life: self.final_life.clone(),
            final_skill: self.final_skill.clone(),
            color: self.color,
            sound: self.sound.clone(),
            flags: self.flags,
        };
        match ctx.tracks.start_custom(start, ctx.config) {
            Ok(()) if gates => Ok(RunOutcome::Animating),
            // Either the effect does not gate progression or a custom
            // track is already in flight and this request was dropped.
            _ => Ok(RunOutcome::Completed),
        }
    }
}
