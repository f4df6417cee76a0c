use crate::state::Rgba;

/// Closed set of move identities. Profiles (power, cost, presentation) are
/// data-driven and resolved through [`MoveOracle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveKind {
    Tackle,
    Slam,
    Flare,
    Mend,
    SirenSong,
}

/// Primary outcome a move drives each target's life toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveEffect {
    /// Reduce target life by `power`, clamped at zero.
    Damage { power: u32 },
    /// Restore target life by `amount`, clamped at the target's maximum.
    Restore { amount: u32 },
}

/// Follow-up applied once the move's animation track completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SecondaryEffect {
    /// Source recovers this percentage of the life the move removed.
    LeechLife { percent: u32 },
    /// Targets drop their guard stance.
    BreakGuard,
    /// Source recovers skill points.
    RestoreSkill { amount: u32 },
}

/// Complete data-driven specification of one move.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveProfile {
    pub kind: MoveKind,
    pub name: String,
    /// Skill points subtracted from the source at animation kickoff.
    pub sp_cost: u32,
    pub effect: MoveEffect,
    /// Tint of the particle burst spawned over each target.
    pub color: Rgba,
    /// Sound effect played at kickoff.
    pub sound: String,
    pub secondary: Option<SecondaryEffect>,
}

impl MoveProfile {
    /// Final life value this move drives `current` toward, honoring the
    /// target's guard stance (guarding halves incoming damage).
    pub fn final_life(&self, current: u32, max: u32, guarding: bool) -> u32 {
        match self.effect {
            MoveEffect::Damage { power } => {
                let power = if guarding { power / 2 } else { power };
                current.saturating_sub(power)
            }
            MoveEffect::Restore { amount } => (current + amount).min(max),
        }
    }
}

/// Read-only registry of move profiles.
pub trait MoveOracle {
    fn profile(&self, kind: MoveKind) -> Option<&MoveProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tackle() -> MoveProfile {
        MoveProfile {
            kind: MoveKind::Tackle,
            name: "Tackle".into(),
            sp_cost: 0,
            effect: MoveEffect::Damage { power: 20 },
            color: Rgba::WHITE,
            sound: "hit_soft".into(),
            secondary: None,
        }
    }

    #[test]
    fn damage_clamps_at_zero() {
        assert_eq!(tackle().final_life(12, 60, false), 0);
        assert_eq!(tackle().final_life(60, 60, false), 40);
    }

    #[test]
    fn guard_halves_damage() {
        assert_eq!(tackle().final_life(60, 60, true), 50);
    }

    #[test]
    fn restore_clamps_at_max() {
        let mend = MoveProfile {
            kind: MoveKind::Mend,
            effect: MoveEffect::Restore { amount: 30 },
            ..tackle()
        };
        assert_eq!(mend.final_life(50, 60, false), 60);
    }
}
