//! Concrete action variants, grouped by concern.

pub mod combat;
pub mod interface;
pub mod party;
pub mod system;

pub use combat::{CustomEffectAction, UseAttackAction, UseMoveAction};
pub use interface::{OpenSubMenuAction, ReadMessageAction, ToggleHudAction};
pub use party::{FaintAction, ReviveAction, SwapAllyAction};
pub use system::{EndTurnAction, ExitCombatAction};
