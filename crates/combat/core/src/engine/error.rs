/// Errors surfaced by the engine's suspend/resume surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    /// `resume` called with no suspension active.
    #[error("no suspension is active")]
    NotSuspended,

    /// The token does not match the most recent suspension. Suspensions
    /// resume in LIFO order.
    #[error("suspend token does not match the most recent suspension")]
    TokenMismatch,

    /// `resume_interface` called while no sub-menu or dialogue is open.
    #[error("no interface surface is open")]
    NoInterfaceOpen,
}
