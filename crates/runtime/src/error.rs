use combat_content::ContentError;
use combat_core::{ActionError, EngineError, StateError};

/// Errors surfaced by the session and scenario drivers.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Content(#[from] ContentError),

    /// `choose` called while no sub-menu is open.
    #[error("no sub-menu is open")]
    NoMenuOpen,

    /// A scripted scenario stopped making progress.
    #[error("scenario '{name}' did not settle within {frames} frames")]
    Stalled { name: String, frames: u32 },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
