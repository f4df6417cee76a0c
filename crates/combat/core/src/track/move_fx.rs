use arrayvec::ArrayVec;

use super::health::HealthBarLerp;
use super::{Timeline, TrackPhase};
use crate::config::CombatConfig;
use crate::env::{CombatEnv, EffectId, PoseCue, SecondaryEffect};
use crate::state::{CombatState, EntityId, Rgba};

/// Payload handed to [`super::TrackSet::start_move`] by a move action.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveStart {
    pub source: EntityId,
    pub sp_cost: u32,
    pub sound: String,
    pub color: Rgba,
    pub secondary: Option<SecondaryEffect>,
    pub lerps: Vec<HealthBarLerp>,
}

/// Resolution payload reported when the move animation completes.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveCompletion {
    pub source: EntityId,
    pub secondary: Option<SecondaryEffect>,
    /// `(target, life when scheduled, final life)` per addressed target.
    pub targets: Vec<(EntityId, u32, u32)>,
}

impl MoveCompletion {
    /// Total life the move removed across its targets.
    pub fn damage_dealt(&self) -> u32 {
        self.targets
            .iter()
            .map(|&(_, from, final_life)| from.saturating_sub(final_life))
            .sum()
    }
}

/// The standard move animation: attack pose on the source, interpolated
/// health bars on the targets, and a particle burst per target.
///
/// Active completes only when the pose has finished AND every health bar
/// has reached its final value AND every spawned particle has expired.
#[derive(Debug, Default)]
pub struct MoveTrack {
    timeline: Timeline,
    source: EntityId,
    sp_cost: u32,
    sound: String,
    color: Rgba,
    secondary: Option<SecondaryEffect>,
    lerps: ArrayVec<HealthBarLerp, { CombatConfig::MAX_TRACK_TARGETS }>,
    particles: ArrayVec<EffectId, { CombatConfig::MAX_TRACK_TARGETS }>,
}

impl MoveTrack {
    pub fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    pub fn phase(&self) -> TrackPhase {
        self.timeline.phase()
    }

    pub fn active_elapsed(&self) -> f64 {
        self.timeline.active_elapsed()
    }

    pub(super) fn start(&mut self, start: MoveStart, config: &CombatConfig) {
        self.source = start.source;
        self.sp_cost = start.sp_cost;
        self.sound = start.sound;
        self.color = start.color;
        self.secondary = start.secondary;
        self.lerps.clear();
        for lerp in start.lerps.into_iter().take(CombatConfig::MAX_TRACK_TARGETS) {
            self.lerps.push(lerp);
        }
        self.particles.clear();
        self.timeline = Timeline::start(config.move_front_delay, config.move_back_delay);
    }

    /// One-time side effects fired the frame the front delay expires:
    /// attack pose, skill-point cost, kickoff sound, one burst per target.
    fn kickoff(&mut self, state: &mut CombatState, env: &CombatEnv<'_>, config: &CombatConfig) {
        if let Some(source) = state.combatant_mut(self.source) {
            source.spend_skill(self.sp_cost);
        }
        if let Ok(scene) = env.scene() {
            scene.play_pose(self.source, PoseCue::Attack);
        }
        if let Ok(audio) = env.audio() {
            audio.play_sound(&self.sound);
        }
        if let (Ok(scene), Ok(fx)) = (env.scene(), env.fx()) {
            for lerp in &self.lerps {
                let at = scene.position(lerp.entity);
                let _ = self
                    .particles
                    .try_push(fx.spawn_burst(at, self.color, config.burst_size));
            }
        }
    }

    pub(super) fn update(
        &mut self,
        dt: f64,
        state: &mut CombatState,
        env: &CombatEnv<'_>,
        config: &CombatConfig,
    ) -> Option<MoveCompletion> {
        match self.timeline.phase() {
            TrackPhase::Idle | TrackPhase::Complete => None,
            TrackPhase::FrontDelay => {
                if self.timeline.tick_front(dt) {
                    self.kickoff(state, env, config);
                }
                None
            }
            TrackPhase::Active => {
                let pose_done = env
                    .scene()
                    .map(|scene| scene.pose_finished(self.source))
                    .unwrap_or(true);

                let mut bars_done = true;
                for lerp in &mut self.lerps {
                    if !lerp.advance(dt, config.health_bar_speed, state) {
                        bars_done = false;
                    }
                }

                let fx_done = match env.fx() {
                    Ok(fx) => self.particles.iter().all(|&id| !fx.effect_alive(id)),
                    Err(_) => true,
                };

                self.timeline
                    .tick_active(dt, pose_done && bars_done && fx_done);
                None
            }
            TrackPhase::BackDelay => {
                if self.timeline.tick_back(dt) {
                    let completion = MoveCompletion {
                        source: self.source,
                        secondary: self.secondary,
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

    fn start_tackle(track: &mut MoveTrack, config: &CombatConfig) {
        track.start(
            MoveStart {
                source: EntityId(1),
                sp_cost: 2,
                sound: "hit_soft".into(),
                color: Rgba::WHITE,
                secondary: None,
                lerps: vec![HealthBarLerp::new(EntityId(2), 60, 40)],
            },
            config,
        );
    }

    #[test]
    fn completes_against_empty_env_once_bars_settle() {
        let config = CombatConfig::without_delays();
        let mut state = CombatState::new();
        state
            .roster
            .insert(CombatantState::new(EntityId(1), 50, 10))
            .unwrap();
        state
            .roster
            .insert(CombatantState::new(EntityId(2), 60, 0))
            .unwrap();

        let mut track = MoveTrack::default();
        start_tackle(&mut track, &config);
        let env = crate::env::CombatEnv::empty();

        let mut completion = None;
        for _ in 0..64 {
            if let Some(done) = track.update(0.1, &mut state, &env, &config) {
                completion = Some(done);
                break;
            }
        }
        let completion = completion.expect("move track never completed");
        assert_eq!(completion.targets, vec![(EntityId(2), 60, 40)]);
        assert_eq!(completion.damage_dealt(), 20);
        assert_eq!(state.combatant(EntityId(2)).unwrap().life, 40);
        // Skill cost was applied exactly once, at kickoff.
        assert_eq!(state.combatant(EntityId(1)).unwrap().skill_points, 8);
        // Fields reset to Idle defaults after completion.
        assert!(track.is_idle());
        assert_eq!(track.active_elapsed(), 0.0);
    }
}
