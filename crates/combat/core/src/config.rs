/// Combat configuration constants and tunable parameters.
///
/// Compile-time `MAX_*` constants bound the fixed-capacity collections used
/// throughout the state types. The runtime-tunable fields control animation
/// pacing and are owned by the [`crate::engine::CombatEngine`] for the
/// lifetime of a combat session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Rate at which a displayed health bar approaches its final value,
    /// in life-points per second.
    pub health_bar_speed: f64,

    /// Pause before the standard move animation becomes visible.
    pub move_front_delay: f64,
    /// Beat after the standard move animation before the next action runs.
    pub move_back_delay: f64,

    /// Pause before the faint/revive sprite sequence starts.
    pub faint_front_delay: f64,
    /// Beat after the faint/revive sequence completes.
    pub faint_back_delay: f64,

    /// Pause before the party-swap fade begins.
    pub swap_front_delay: f64,
    /// Beat after both fade effects return to neutral.
    pub swap_back_delay: f64,

    /// Pause before a custom scripted effect kicks off.
    pub custom_front_delay: f64,
    /// Beat after a custom scripted effect resolves.
    pub custom_back_delay: f64,

    /// Radius of the particle bursts spawned by move and custom effects.
    pub burst_size: f32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum combatants participating in one session (both sides).
    pub const MAX_COMBATANTS: usize = 12;
    /// Maximum player-side party slots.
    pub const MAX_PARTY_SLOTS: usize = 6;
    /// Maximum targets a single move or custom effect may address.
    pub const MAX_TRACK_TARGETS: usize = 8;
    /// Maximum option labels a sub-menu may carry.
    pub const MAX_SUBMENU_OPTIONS: usize = 12;

    /// Queue depth above which enqueue logs a backlog warning. A combat
    /// sequence that outruns this is almost always a scripting bug.
    pub const QUEUE_PRESSURE: usize = 64;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HEALTH_BAR_SPEED: f64 = 20.0;
    pub const DEFAULT_BURST_SIZE: f32 = 24.0;

    pub fn new() -> Self {
        Self {
            health_bar_speed: Self::DEFAULT_HEALTH_BAR_SPEED,
            move_front_delay: 0.25,
            move_back_delay: 0.5,
            faint_front_delay: 0.2,
            faint_back_delay: 0.4,
            swap_front_delay: 0.15,
            swap_back_delay: 0.35,
            custom_front_delay: 0.2,
            custom_back_delay: 0.3,
            burst_size: Self::DEFAULT_BURST_SIZE,
        }
    }

    /// Zero-delay configuration used by headless tooling and tests that
    /// only care about interpolation timing.
    pub fn without_delays() -> Self {
        Self {
            move_front_delay: 0.0,
            move_back_delay: 0.0,
            faint_front_delay: 0.0,
            faint_back_delay: 0.0,
            swap_front_delay: 0.0,
            swap_back_delay: 0.0,
            custom_front_delay: 0.0,
            custom_back_delay: 0.0,
            ..Self::new()
        }
    }

    pub fn with_health_bar_speed(mut self, health_bar_speed: f64) -> Self {
        self.health_bar_speed = health_bar_speed;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
