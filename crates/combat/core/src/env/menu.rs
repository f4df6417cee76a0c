use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::{EntityId, Rgba, StagePos};

/// What a sub-menu is being opened for; the host uses this to route the
/// selection back to its decision logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubMenuKind {
    Moves,
    Targets,
    Party,
    Items,
    Confirm,
}

/// A sub-menu open request: kind, option labels, and optional presentation
/// overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubMenuSpec {
    pub kind: SubMenuKind,
    pub options: ArrayVec<String, { CombatConfig::MAX_SUBMENU_OPTIONS }>,
    pub origin: Option<StagePos>,
    pub palette: Option<Rgba>,
}

impl SubMenuSpec {
    /// True if `index` addresses one of the option labels.
    pub fn in_bounds(&self, index: usize) -> bool {
        index < self.options.len()
    }
}

/// Host sub-menu / dialogue subsystem.
///
/// The host promises to call [`crate::engine::CombatEngine::resume_interface`]
/// when the opened surface closes; the engine stays suspended until then.
pub trait MenuOracle {
    /// Opens a sub-menu and switches the host into its sub-menu mode.
    fn open_sub_menu(&self, spec: &SubMenuSpec);

    /// Opens a dialogue line. `interactive` dialogues wait for player
    /// confirmation; others are timed out by the host.
    fn open_message(&self, text: &str, interactive: bool);

    /// Shows or hides the combat HUD.
    fn set_hud_visible(&self, visible: bool);
}

/// Host party composition service.
pub trait PartyOracle {
    /// Exchanges two members' positions in the host's party layout.
    fn swap_slots(&self, a: EntityId, b: EntityId);
}
