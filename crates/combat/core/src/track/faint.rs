use arrayvec::ArrayVec;

use super::{Timeline, TrackPhase};
use crate::config::CombatConfig;
use crate::env::CombatEnv;
use crate::state::EntityId;

/// Whether the sprite sequence plays the faint or the revive direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaintDirection {
    #[default]
    Faint,
    Revive,
}

/// Resolution payload reported when the faint/revive animation completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaintCompletion {
    pub direction: FaintDirection,
    pub entities: Vec<EntityId>,
}

/// The standard faint/revive animation: one sprite sequence per affected
/// combatant; Active completes when every sequence reports finished.
#[derive(Debug, Default)]
pub struct FaintTrack {
    timeline: Timeline,
    direction: FaintDirection,
    entities: ArrayVec<EntityId, { CombatConfig::MAX_TRACK_TARGETS }>,
}

impl FaintTrack {
    pub fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    pub fn phase(&self) -> TrackPhase {
        self.timeline.phase()
    }

    pub(super) fn start(
        &mut self,
        direction: FaintDirection,
        entities: &[EntityId],
        config: &CombatConfig,
    ) {
        self.direction = direction;
        self.entities.clear();
        for &entity in entities.iter().take(CombatConfig::MAX_TRACK_TARGETS) {
            self.entities.push(entity);
        }
        self.timeline = Timeline::start(config.faint_front_delay, config.faint_back_delay);
    }

    fn kickoff(&self, env: &CombatEnv<'_>) {
        if let Ok(scene) = env.scene() {
            for &entity in &self.entities {
                match self.direction {
                    FaintDirection::Faint => scene.play_faint(entity),
                    FaintDirection::Revive => scene.play_revive(entity),
                }
            }
        }
    }

    pub(super) fn update(&mut self, dt: f64, env: &CombatEnv<'_>) -> Option<FaintCompletion> {
        match self.timeline.phase() {
            TrackPhase::Idle | TrackPhase::Complete => None,
            TrackPhase::FrontDelay => {
                if self.timeline.tick_front(dt) {
                    self.kickoff(env);
                }
                None
            }
            TrackPhase::Active => {
                let sequences_done = match env.scene() {
                    Ok(scene) => self
                        .entities
                        .iter()
                        .all(|&entity| scene.faint_sequence_finished(entity)),
                    Err(_) => true,
                };
                self.timeline.tick_active(dt, sequences_done);
                None
            }
            TrackPhase::BackDelay => {
                if self.timeline.tick_back(dt) {
                    let completion = FaintCompletion {
                        direction: self.direction,
                        entities: self.entities.iter().copied().collect(),
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

    #[test]
    fn runs_front_active_back_against_empty_env() {
        let config = CombatConfig::default();
        let mut track = FaintTrack::default();
        track.start(FaintDirection::Faint, &[EntityId(3)], &config);
        let env = CombatEnv::empty();

        let mut frames = 0;
        let completion = loop {
            frames += 1;
            assert!(frames < 128, "faint track never completed");
            if let Some(done) = track.update(0.1, &env) {
                break done;
            }
        };
        assert_eq!(completion.direction, FaintDirection::Faint);
        assert_eq!(completion.entities, vec![EntityId(3)]);
        assert!(track.is_idle());
    }
}
