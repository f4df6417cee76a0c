use arrayvec::ArrayVec;

use super::health::HealthBarLerp;
use super::{Timeline, TrackPhase};
use crate::config::CombatConfig;
use crate::env::{CombatEnv, EffectId};
use crate::state::{CombatState, EntityId, Rgba};

bitflags::bitflags! {
    /// Behavior switches for a scripted custom effect.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CustomEffectFlags: u8 {
        /// Gate turn progression on this track. Without it the owning
        /// action completes immediately and the effect plays out over the
        /// following actions.
        const WAIT = 1 << 0;
        /// Spawn a tinted particle burst over each affected combatant.
        const BURST = 1 << 1;
        /// Interpolate life toward the final values instead of snapping
        /// them at kickoff.
        const LERP_LIFE = 1 << 2;
    }
}

impl Default for CustomEffectFlags {
    fn default() -> Self {
        Self::WAIT | Self::BURST | Self::LERP_LIFE
    }
}

/// Payload handed to [`super::TrackSet::start_custom`].
#[derive(Clone, Debug, PartialEq)]
pub struct CustomStart {
    pub entities: Vec<EntityId>,
    /// `(entity, final life)` resolutions applied by this effect.
    pub final_life: Vec<(EntityId, u32)>,
    /// `(entity, final skill points)` resolutions snapped at kickoff.
    pub final_skill: Vec<(EntityId, u32)>,
    pub color: Rgba,
    pub sound: Option<String>,
    pub flags: CustomEffectFlags,
}

/// Resolution payload reported when a custom effect completes.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomCompletion {
    pub entities: Vec<EntityId>,
    /// `(target, life when scheduled, final life)` for the faint sweep.
    pub targets: Vec<(EntityId, u32, u32)>,
}

/// Generic scripted visual/audio effect with optional life/skill
/// resolution, used by cutscene-grade combat scripting.
#[derive(Debug, Default)]
pub struct CustomTrack {
    timeline: Timeline,
    entities: ArrayVec<EntityId, { CombatConfig::MAX_TRACK_TARGETS }>,
    lerps: ArrayVec<HealthBarLerp, { CombatConfig::MAX_TRACK_TARGETS }>,
    final_skill: ArrayVec<(EntityId, u32), { CombatConfig::MAX_TRACK_TARGETS }>,
    color: Rgba,
    sound: Option<String>,
    flags: CustomEffectFlags,
    particles: ArrayVec<EffectId, { CombatConfig::MAX_TRACK_TARGETS }>,
}

impl CustomTrack {
    pub fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    pub fn phase(&self) -> TrackPhase {
        self.timeline.phase()
    }

    /// True while this track is playing and configured to gate progression.
    pub fn is_gating(&self) -> bool {
        !self.is_idle() && self.flags.contains(CustomEffectFlags::WAIT)
    }

    pub(super) fn start(&mut self, start: CustomStart, config: &CombatConfig) {
        self.entities.clear();
        for entity in start.entities.into_iter().take(CombatConfig::MAX_TRACK_TARGETS) {
            self.entities.push(entity);
        }
        self.lerps.clear();
        self.final_skill.clear();
        for (entity, final_skill) in start
            .final_skill
            .into_iter()
            .take(CombatConfig::MAX_TRACK_TARGETS)
        {
            self.final_skill.push((entity, final_skill));
        }
        self.color = start.color;
        self.sound = start.sound;
        self.flags = start.flags;
        self.particles.clear();
        // Lerp entries need the life at kickoff; stash the finals until then.
        for (entity, final_life) in start
            .final_life
            .into_iter()
            .take(CombatConfig::MAX_TRACK_TARGETS)
        {
            self.lerps.push(HealthBarLerp::new(entity, 0, final_life));
        }
        self.timeline = Timeline::start(config.custom_front_delay, config.custom_back_delay);
    }

    fn kickoff(&mut self, state: &mut CombatState, env: &CombatEnv<'_>, config: &CombatConfig) {
        // Re-anchor the lerps to the life each target actually has now.
        for lerp in &mut self.lerps {
            let current = state
                .combatant(lerp.entity)
                .map(|c| c.life)
                .unwrap_or(lerp.final_life);
            *lerp = HealthBarLerp::new(lerp.entity, current, lerp.final_life);
        }

        if !self.flags.contains(CustomEffectFlags::LERP_LIFE) {
            for lerp in &mut self.lerps {
                if let Some(combatant) = state.combatant_mut(lerp.entity) {
                    combatant.set_life(lerp.final_life);
                }
            }
        }

        for &(entity, final_skill) in &self.final_skill {
            if let Some(combatant) = state.combatant_mut(entity) {
                combatant.skill_points = final_skill.min(combatant.max_skill_points);
            }
        }

        if let Some(sound) = &self.sound {
            if let Ok(audio) = env.audio() {
                audio.play_sound(sound);
            }
        }

        if self.flags.contains(CustomEffectFlags::BURST) {
            if let (Ok(scene), Ok(fx)) = (env.scene(), env.fx()) {
                for &entity in &self.entities {
                    let at = scene.position(entity);
                    let _ = self
                        .particles
                        .try_push(fx.spawn_burst(at, self.color, config.burst_size));
                }
            }
        }
    }

    pub(super) fn update(
        &mut self,
        dt: f64,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
        config: &CombatConfig,
    ) -> Option<CustomCompletion> {
        match self.timeline.phase() {
            TrackPhase::Idle | TrackPhase::Complete => None,
            TrackPhase::FrontDelay => {
                if self.timeline.tick_front(dt) {
                    self.kickoff(state, env, config);
                }
                None
            }
            TrackPhase::Active => {
                let mut bars_done = true;
                if self.flags.contains(CustomEffectFlags::LERP_LIFE) {
                    for lerp in &mut self.lerps {
                        if !lerp.advance(dt, config.health_bar_speed, state) {
                            bars_done = false;
                        }
                    }
                }
                let fx_done = match env.fx() {
                    Ok(fx) => self.particles.iter().all(|&id| !fx.effect_alive(id)),
                    Err(_) => true,
                };
                self.timeline.tick_active(dt, bars_done && fx_done);
                None
            }
            TrackPhase::BackDelay => {
                if self.timeline.tick_back(dt) {
                    let completion = CustomCompletion {
                        entities: self.entities.iter().copied().collect(),
                        targets: self
                            .lerps
                            .iter()
                            .map(|lerp| (lerp.entity, lerp.from, lerp.final_life))
                            .collect(),
                    };
                    *self = Self::default();
                    Some(completion)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CombatantState;

    #[test]
    fn snaps_life_and_skill_without_lerp_flag() {
        let config = CombatConfig::without_delays();
        let mut state = CombatState::new();
        state
            .roster
            .insert(CombatantState::new(EntityId(4), 80, 12))
            .unwrap();

        let mut track = CustomTrack::default();
        track.start(
            CustomStart {
                entities: vec![EntityId(4)],
                final_life: vec![(EntityId(4), 15)],
                final_skill: vec![(EntityId(4), 3)],
                color: Rgba::WHITE,
                sound: None,
                flags: CustomEffectFlags::WAIT,
            },
            &config,
        );

        let env = CombatEnv::empty();
        let mut completion = None;
        for _ in 0..16 {
            if let Some(done) = track.update(0.1, &mut state, &env, &config) {
                completion = Some(done);
                break;
            }
        }
        assert!(completion.is_some());
        let combatant = state.combatant(EntityId(4)).unwrap();
        assert_eq!(combatant.life, 15);
        assert_eq!(combatant.skill_points, 3);
        assert!(track.is_idle());
    }
}
