use std::fmt;

use crate::state::{Rgba, StagePos};

/// Handle to one live particle effect, issued by the host renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u64);

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx:{}", self.0)
    }
}

/// Host particle subsystem.
pub trait FxOracle {
    /// Spawns a particle burst and returns its tracking handle.
    fn spawn_burst(&self, at: StagePos, color: Rgba, size: f32) -> EffectId;

    /// True while the effect is still playing.
    fn effect_alive(&self, id: EffectId) -> bool;
}

/// Host audio subsystem.
pub trait AudioOracle {
    /// Plays a one-shot sound effect by name.
    fn play_sound(&self, name: &str);
}
