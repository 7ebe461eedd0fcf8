//! Reader configuration.
//!
//! Configuration is an explicit value handed to a reader at construction.
//! There is no process-wide state in this crate.

use crate::error::{Result, ZbinError};

/// Default window capacity: 1 MiB.
pub const DEFAULT_WINDOW_CAPACITY: usize = 1024 * 1024;

/// Settings for a [`BinaryReader`](crate::reader::BinaryReader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Size in bytes of the single cached window.
    ///
    /// Reads larger than this bypass the cache entirely.
    pub window_capacity: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
        }
    }
}

impl ReaderConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window capacity.
    pub fn window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity;
        self
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.window_capacity == 0 {
            return Err(ZbinError::invalid_argument(
                "window capacity must be at least one byte",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let cfg = ReaderConfig::default();
        assert_eq!(cfg.window_capacity, 1 << 20);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let cfg = ReaderConfig::new().window_capacity(16);
        assert_eq!(cfg.window_capacity, 16);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let cfg = ReaderConfig::new().window_capacity(0);
        assert!(matches!(
            cfg.validate(),
            Err(ZbinError::InvalidArgument { .. })
        ));
    }
}
