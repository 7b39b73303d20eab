//! Atlas build configuration.

use crate::error::{AtlasError, Result};
use serde::{Deserialize, Serialize};

/// Largest atlas dimension that will ever be allocated.
pub const MAX_TEXTURE_SIZE: u32 = 32 * 1024;
/// Preferred atlas dimension for renderers with tighter limits.
pub const PREF_TEXTURE_SIZE: u32 = 4 * 1024;
/// Smallest atlas dimension the size estimate will return.
pub const MIN_TEXTURE_SIZE: u32 = 256;

/// Configuration for building a texture atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Lower bound for the estimated atlas dimension.
    pub min_texture_size: u32,
    /// Upper bound; exceeding it aborts the build.
    pub max_texture_size: u32,
    /// Padding cap used while estimating the atlas size.
    /// Constructed atlases always use `size >> 7`.
    pub sizing_padding_cap: u32,
    /// Log percentage progress while inserting patches.
    pub report_progress: bool,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            min_texture_size: MIN_TEXTURE_SIZE,
            max_texture_size: MAX_TEXTURE_SIZE,
            sizing_padding_cap: 32,
            report_progress: true,
        }
    }
}

impl AtlasConfig {
    /// Create config with a different maximum atlas dimension.
    pub fn with_max_texture_size(mut self, size: u32) -> Self {
        self.max_texture_size = size;
        self
    }

    /// Create config with a different minimum atlas dimension.
    pub fn with_min_texture_size(mut self, size: u32) -> Self {
        self.min_texture_size = size;
        self
    }

    /// Enable or disable progress logging.
    pub fn with_progress(mut self, report_progress: bool) -> Self {
        self.report_progress = report_progress;
        self
    }

    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the size bounds are usable.
    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("min_texture_size", self.min_texture_size),
            ("max_texture_size", self.max_texture_size),
        ] {
            if !size.is_power_of_two() {
                return Err(AtlasError::InvalidConfig(format!(
                    "{} must be a non-zero power of two, got {}",
                    name, size
                )));
            }
        }

        if self.min_texture_size > self.max_texture_size {
            return Err(AtlasError::InvalidConfig(format!(
                "min_texture_size ({}) exceeds max_texture_size ({})",
                self.min_texture_size, self.max_texture_size
            )));
        }

        Ok(())
    }
}
