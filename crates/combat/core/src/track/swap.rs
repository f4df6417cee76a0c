use super::{Timeline, TrackPhase};
use crate::config::CombatConfig;
use crate::env::{CombatEnv, FadeState};
use crate::state::EntityId;

/// Resolution payload reported when the party-swap animation completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapCompletion {
    pub outgoing: EntityId,
    pub incoming: EntityId,
}

/// The standard party-swap animation: both sprites fade out and back in;
/// Active completes once both fade effects are neutral again.
#[derive(Debug, Default)]
pub struct SwapTrack {
    timeline: Timeline,
    outgoing: EntityId,
    incoming: EntityId,
}

impl SwapTrack {
    pub fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    pub fn phase(&self) -> TrackPhase {
        self.timeline.phase()
    }

    pub(super) fn start(&mut self, outgoing: EntityId, incoming: EntityId, config: &CombatConfig) {
        self.outgoing = outgoing;
        self.incoming = incoming;
        self.timeline = Timeline::start(config.swap_front_delay, config.swap_back_delay);
    }

    fn kickoff(&self, env: &CombatEnv<'_>) {
        if let Ok(scene) = env.scene() {
            scene.begin_fade(self.outgoing);
            scene.begin_fade(self.incoming);
        }
    }

    pub(super) fn update(&mut self, dt: f64, env: &CombatEnv<'_>) -> Option<SwapCompletion> {
        match self.timeline.phase() {
            TrackPhase::Idle | TrackPhase::Complete => None,
            TrackPhase::FrontDelay => {
                if self.timeline.tick_front(dt) {
                    self.kickoff(env);
                }
                None
            }
            TrackPhase::Active => {
                let fades_neutral = match env.scene() {
                    Ok(scene) => {
                        scene.fade_state(self.outgoing) == FadeState::Neutral
                            && scene.fade_state(self.incoming) == FadeState::Neutral
                    }
                    Err(_) => true,
                };
                self.timeline.tick_active(dt, fades_neutral);
                None
            }
            TrackPhase::BackDelay => {
                if self.timeline.tick_back(dt) {
                    let completion = SwapCompletion {
                        outgoing: self.outgoing,
                        incoming: self.incoming,
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
