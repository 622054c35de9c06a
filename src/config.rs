use crate::error::ConfigError;

/// Tunables for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Searches continue from the other end of the buffer.
    pub wrap_scan: bool,
    /// Upper bound for typed counts and their products.
    pub max_count: u32,
}

impl EngineConfig {
    pub const DEFAULT_MAX_COUNT: u32 = 9_999;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_count == 0 {
            return Err(ConfigError::ZeroCountLimit);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            wrap_scan: true,
            max_count: Self::DEFAULT_MAX_COUNT,
        }
    }
}
