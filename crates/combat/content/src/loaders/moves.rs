//! Move profile loader.
//!
//! Loads move profiles from embedded RON data files and exposes them
//! through the core [`MoveOracle`] trait.

use std::collections::HashMap;

use combat_core::{MoveKind, MoveOracle, MoveProfile};

use crate::ContentError;

/// Registry for move profiles, keyed by [`MoveKind`].
#[derive(Debug, Clone)]
pub struct MoveRegistry {
    profiles: HashMap<MoveKind, MoveProfile>,
}

impl MoveRegistry {
    /// Loads all move profiles from embedded RON data files.
    pub fn load() -> Result<Self, ContentError> {
        let mut profiles = HashMap::new();

        let basic_ron = include_str!("../../data/moves/basic.ron");
        let basic_profiles: Vec<MoveProfile> =
            ron::from_str(basic_ron).map_err(|source| ContentError::Parse {
                file: "moves/basic.ron",
                source,
            })?;
        for profile in basic_profiles {
            profiles.insert(profile.kind, profile);
        }

        Ok(Self { profiles })
    }

    /// Gets a move profile by kind, if registered.
    pub fn get(&self, kind: MoveKind) -> Option<&MoveProfile> {
        self.profiles.get(&kind)
    }

    /// Returns an iterator over all registered move kinds.
    pub fn kinds(&self) -> impl Iterator<Item = MoveKind> + '_ {
        self.profiles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl MoveOracle for MoveRegistry {
    fn profile(&self, kind: MoveKind) -> Option<&MoveProfile> {
        self.get(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{MoveEffect, SecondaryEffect};
    use strum::IntoEnumIterator;

    #[test]
    fn every_move_kind_has_a_profile() {
        let registry = MoveRegistry::load().expect("failed to load move profiles");
        for kind in MoveKind::iter() {
            assert!(registry.get(kind).is_some(), "missing profile for {kind}");
        }
    }

    #[test]
    fn tackle_matches_baseline_numbers() {
        let registry = MoveRegistry::load().unwrap();
        let tackle = registry.get(MoveKind::Tackle).unwrap();
        assert_eq!(tackle.sp_cost, 0);
        assert_eq!(tackle.effect, MoveEffect::Damage { power: 20 });
        assert!(tackle.secondary.is_none());
    }

    #[test]
    fn siren_song_leeches_half() {
        let registry = MoveRegistry::load().unwrap();
        let song = registry.get(MoveKind::SirenSong).unwrap();
        assert_eq!(
            song.secondary,
            Some(SecondaryEffect::LeechLife { percent: 50 })
        );
    }
}
