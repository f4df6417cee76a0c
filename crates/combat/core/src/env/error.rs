/// Errors raised when a required collaborator is absent from the
/// environment bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("scene oracle not available")]
    SceneNotAvailable,

    #[error("fx oracle not available")]
    FxNotAvailable,

    #[error("audio oracle not available")]
    AudioNotAvailable,

    #[error("menu oracle not available")]
    MenuNotAvailable,

    #[error("party oracle not available")]
    PartyNotAvailable,

    #[error("move oracle not available")]
    MovesNotAvailable,
}
