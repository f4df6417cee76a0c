//! Traits describing the host subsystems the engine collaborates with.
//!
//! Oracles expose the entity store's sprite layer, the particle and audio
//! subsystems, the sub-menu/dialogue surface, the party composition
//! service, and the move registry. The [`Env`] aggregate bundles them so
//! the engine can reach everything it needs without hard coupling to
//! concrete implementations; any slot may be absent, and each predicate the
//! tracks poll degrades to "already satisfied" when its oracle is missing.
mod error;
mod fx;
mod menu;
mod moves;
mod scene;

pub use error::OracleError;
pub use fx::{AudioOracle, EffectId, FxOracle};
pub use menu::{MenuOracle, PartyOracle, SubMenuKind, SubMenuSpec};
pub use moves::{MoveEffect, MoveKind, MoveOracle, MoveProfile, SecondaryEffect};
pub use scene::{FadeState, PoseCue, SceneOracle};

/// Aggregates the host collaborators required by actions and tracks.
#[derive(Clone, Copy)]
pub struct Env<'a, S, F, A, U, P, M>
where
    S: SceneOracle + ?Sized,
    F: FxOracle + ?Sized,
    A: AudioOracle + ?Sized,
    U: MenuOracle + ?Sized,
    P: PartyOracle + ?Sized,
    M: MoveOracle + ?Sized,
{
    scene: Option<&'a S>,
    fx: Option<&'a F>,
    audio: Option<&'a A>,
    menu: Option<&'a U>,
    party: Option<&'a P>,
    moves: Option<&'a M>,
}

pub type CombatEnv<'a> = Env<
    'a,
    dyn SceneOracle + 'a,
    dyn FxOracle + 'a,
    dyn AudioOracle + 'a,
    dyn MenuOracle + 'a,
    dyn PartyOracle + 'a,
    dyn MoveOracle + 'a,
>;

impl<'a, S, F, A, U, P, M> Env<'a, S, F, A, U, P, M>
where
    S: SceneOracle + ?Sized,
    F: FxOracle + ?Sized,
    A: AudioOracle + ?Sized,
    U: MenuOracle + ?Sized,
    P: PartyOracle + ?Sized,
    M: MoveOracle + ?Sized,
{
    pub fn new(
        scene: Option<&'a S>,
        fx: Option<&'a F>,
        audio: Option<&'a A>,
        menu: Option<&'a U>,
        party: Option<&'a P>,
        moves: Option<&'a M>,
    ) -> Self {
        Self {
            scene,
            fx,
            audio,
            menu,
            party,
            moves,
        }
    }

    pub fn with_all(
        scene: &'a S,
        fx: &'a F,
        audio: &'a A,
        menu: &'a U,
        party: &'a P,
        moves: &'a M,
    ) -> Self {
        Self::new(
            Some(scene),
            Some(fx),
            Some(audio),
            Some(menu),
            Some(party),
            Some(moves),
        )
    }

    pub fn empty() -> Self {
        Self {
            scene: None,
            fx: None,
            audio: None,
            menu: None,
            party: None,
            moves: None,
        }
    }

    /// Returns the SceneOracle, or an error if not available.
    pub fn scene(&self) -> Result<&'a S, OracleError> {
        self.scene.ok_or(OracleError::SceneNotAvailable)
    }

    /// Returns the FxOracle, or an error if not available.
    pub fn fx(&self) -> Result<&'a F, OracleError> {
        self.fx.ok_or(OracleError::FxNotAvailable)
    }

    /// Returns the AudioOracle, or an error if not available.
    pub fn audio(&self) -> Result<&'a A, OracleError> {
        self.audio.ok_or(OracleError::AudioNotAvailable)
    }

    /// Returns the MenuOracle, or an error if not available.
    pub fn menu(&self) -> Result<&'a U, OracleError> {
        self.menu.ok_or(OracleError::MenuNotAvailable)
    }

    /// Returns the PartyOracle, or an error if not available.
    pub fn party(&self) -> Result<&'a P, OracleError> {
        self.party.ok_or(OracleError::PartyNotAvailable)
    }

    /// Returns the MoveOracle, or an error if not available.
    pub fn moves(&self) -> Result<&'a M, OracleError> {
        self.moves.ok_or(OracleError::MovesNotAvailable)
    }
}

impl<'a, S, F, A, U, P, M> Env<'a, S, F, A, U, P, M>
where
    S: SceneOracle + 'a,
    F: FxOracle + 'a,
    A: AudioOracle + 'a,
    U: MenuOracle + 'a,
    P: PartyOracle + 'a,
    M: MoveOracle + 'a,
{
    /// Converts this environment into a trait-object based [`CombatEnv`].
    pub fn as_combat_env(&self) -> CombatEnv<'a> {
        let scene: Option<&'a dyn SceneOracle> = self.scene.map(|scene| scene as _);
        let fx: Option<&'a dyn FxOracle> = self.fx.map(|fx| fx as _);
        let audio: Option<&'a dyn AudioOracle> = self.audio.map(|audio| audio as _);
        let menu: Option<&'a dyn MenuOracle> = self.menu.map(|menu| menu as _);
        let party: Option<&'a dyn PartyOracle> = self.party.map(|party| party as _);
        let moves: Option<&'a dyn MoveOracle> = self.moves.map(|moves| moves as _);
        Env::new(scene, fx, audio, menu, party, moves)
    }
}
