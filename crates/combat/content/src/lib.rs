//! Data-driven combat content.
//!
//! Move profiles live in RON files embedded at compile time; this crate
//! parses them and exposes registries implementing the core oracle traits.
#[cfg(feature = "loaders")]
mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::MoveRegistry;

/// Errors raised while parsing embedded content data.
#[cfg(feature = "loaders")]
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        source: ron::error::SpannedError,
    },
}
