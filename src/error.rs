//! Error types for atlas generation.

use thiserror::Error;

/// Result type alias using AtlasError.
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Main error type for texture atlas operations.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Failed to read or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to parse or write JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Patch data does not satisfy its own dimensions.
    #[error("Malformed texture patch: {0}")]
    MalformedPatch(String),

    /// The patches do not fit even into the largest allowed atlas.
    #[error("Exceeded maximum texture size ({max})")]
    MaxTextureSizeExceeded { max: u32 },

    /// Tone mapping parameters are unusable.
    #[error("Invalid tone mapping: {0}")]
    InvalidToneMapping(String),

    /// Build configuration is inconsistent.
    #[error("Invalid atlas configuration: {0}")]
    InvalidConfig(String),

    /// Failed to build or encode the texture atlas.
    #[error("Atlas building error: {0}")]
    AtlasBuild(String),
}
