use std::fmt;

/// Unique identifier for any combatant tracked in the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the lead player-side combatant.
    pub const LEAD: Self = Self(0);

    /// Returns true if this entity is the lead player-side combatant.
    #[inline]
    pub const fn is_lead(self) -> bool {
        self.0 == Self::LEAD.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::LEAD
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Continuous stage position in screen units, used when spawning effects
/// over a combatant's sprite.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StagePos {
    pub x: f32,
    pub y: f32,
}

impl StagePos {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// RGBA color carried by effect payloads and move profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}
