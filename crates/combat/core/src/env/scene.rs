use crate::state::{EntityId, StagePos};

/// Pose animations the engine can request from the host's sprite layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoseCue {
    Attack,
    Hurt,
    Cheer,
}

/// Where a combatant's fade effect currently sits.
///
/// The party-swap track waits for both swapped sprites to report
/// [`FadeState::Neutral`] again before handing control back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FadeState {
    #[default]
    Neutral,
    FadingOut,
    FadingIn,
}

/// Host entity store: sprite positions, pose animations, faint sequences,
/// and fade effects.
///
/// Methods take `&self`; implementations that mutate internal timers use
/// interior mutability.
pub trait SceneOracle {
    /// Stage position of the combatant's sprite.
    fn position(&self, entity: EntityId) -> StagePos;

    /// Starts a pose animation on the combatant's sprite.
    fn play_pose(&self, entity: EntityId, cue: PoseCue);

    /// True once the most recently requested pose has finished. Must be
    /// true when no pose was ever requested.
    fn pose_finished(&self, entity: EntityId) -> bool;

    /// Starts the faint sprite sequence.
    fn play_faint(&self, entity: EntityId);

    /// Starts the revive sprite sequence.
    fn play_revive(&self, entity: EntityId);

    /// True once the faint/revive sequence has finished.
    fn faint_sequence_finished(&self, entity: EntityId) -> bool;

    /// Starts a fade-out-then-in cycle on the combatant's sprite.
    fn begin_fade(&self, entity: EntityId);

    /// Current fade effect state for the sprite.
    fn fade_state(&self, entity: EntityId) -> FadeState;
}
