//! Errors at the fallible edges of the crate.
//!
//! Key handling itself never fails; these cover configuration and the
//! system clipboard.

/// An invalid [`EngineConfig`](crate::config::EngineConfig).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// Counts must be allowed to reach at least one.
    #[error("max_count must be at least 1")]
    ZeroCountLimit,
}

/// Failure talking to the system clipboard.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ClipboardError {
    #[cfg(feature = "clipboard")]
    #[error("System clipboard error: {0}")]
    System(#[from] arboard::Error),

    /// The clipboard holds something other than text.
    #[error("Clipboard does not contain text")]
    NotText,
}
