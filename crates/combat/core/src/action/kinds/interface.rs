//! Sub-menu, dialogue, and HUD actions.

use arrayvec::ArrayVec;
use tracing::warn;

use crate::action::{ActionError, ActionKind, ActionRun, RunCtx, RunOutcome};
use crate::config::CombatConfig;
use crate::env::{SubMenuKind, SubMenuSpec};
use crate::events::CombatEvent;
use crate::state::{CombatState, Rgba, StagePos};

/// Opens a sub-menu on the host surface and suspends turn progression
/// until the host reports it closed.
///
/// An empty option list is a scripting bug and is rejected at construction
/// time, before the action can ever be enqueued.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenSubMenuAction {
    pub spec: SubMenuSpec,
}

impl OpenSubMenuAction {
    pub fn new(
        kind: SubMenuKind,
        options: Vec<String>,
        origin: Option<StagePos>,
        palette: Option<Rgba>,
    ) -> Result<Self, ActionError> {
        if options.is_empty() {
            return Err(ActionError::EmptySubMenu);
        }
        if options.len() > CombatConfig::MAX_SUBMENU_OPTIONS {
            warn!(
                count = options.len(),
                "sub-menu options truncated to capacity"
            );
        }
        let mut bounded = ArrayVec::new();
        for option in options.into_iter().take(CombatConfig::MAX_SUBMENU_OPTIONS) {
            bounded.push(option);
        }
        Ok(Self {
            spec: SubMenuSpec {
                kind,
                options: bounded,
                origin,
                palette,
            },
        })
    }
}

impl ActionRun for OpenSubMenuAction {
    fn kind(&self) -> ActionKind {
        ActionKind::OpenSubMenu
    }

    fn validate(&self, _state: &CombatState) -> Result<(), ActionError> {
        if self.spec.options.is_empty() {
            return Err(ActionError::EmptySubMenu);
        }
        Ok(())
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        match ctx.env.menu() {
            Ok(menu) => {
                menu.open_sub_menu(&self.spec);
                Ok(RunOutcome::Suspended)
            }
            Err(_) => {
                // No menu surface on this host; nothing to wait on.
                warn!(kind = %self.spec.kind, "no menu oracle, sub-menu skipped");
                Ok(RunOutcome::Completed)
            }
        }
    }
}

/// Opens a dialogue line and suspends turn progression until the host
/// closes it (confirmation for interactive lines, a timer otherwise).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadMessageAction {
    pub text: String,
    pub interactive: bool,
}

impl ReadMessageAction {
    pub fn new(text: impl Into<String>, interactive: bool) -> Self {
        Self {
            text: text.into(),
            interactive,
        }
    }
}

impl ActionRun for ReadMessageAction {
    fn kind(&self) -> ActionKind {
        ActionKind::ReadMessage
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        match ctx.env.menu() {
            Ok(menu) => {
                menu.open_message(&self.text, self.interactive);
                Ok(RunOutcome::Suspended)
            }
            Err(_) => Ok(RunOutcome::Completed),
        }
    }
}

/// Shows or hides the combat HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToggleHudAction {
    pub visible: bool,
}

impl ActionRun for ToggleHudAction {
    fn kind(&self) -> ActionKind {
        ActionKind::ToggleHud
    }

    fn run(&self, ctx: &mut RunCtx<'_, '_>) -> Result<RunOutcome, ActionError> {
        ctx.state.hud_visible = self.visible;
        if let Ok(menu) = ctx.env.menu() {
            menu.set_hud_visible(self.visible);
        }
        ctx.events.push(CombatEvent::HudToggled {
            visible: self.visible,
        });
        Ok(RunOutcome::Completed)
    }
}
