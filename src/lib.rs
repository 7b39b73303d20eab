//! # Patch Atlas
//!
//! Packs independently rendered HDR texture patches into a single texture
//! atlas for a textured mesh.
//!
//! ## Overview
//!
//! Each [`TexturePatch`] holds linear radiance, a validity mask and the
//! texture coordinates of the mesh faces it covers. Building an atlas:
//!
//! 1. sorts patches by size and estimates a starting atlas size,
//! 2. tone maps every patch into 8-bit RGB and packs it with a
//!    [`BinPacker`], doubling the atlas size and starting over whenever a
//!    patch does not fit,
//! 3. dilates patch content into the padding around each patch to avoid
//!    seams, and
//! 4. remaps texture coordinates into `[0, 1]` atlas space and
//!    deduplicates them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use patch_atlas::{estimate_tone_mapping, load_manifest, AtlasBuilder, AtlasConfig};
//!
//! let patches = load_manifest("patches.json")?;
//! let tone = estimate_tone_mapping(&patches)?;
//!
//! let atlas = AtlasBuilder::new(AtlasConfig::default()).build(patches, &tone)?;
//! atlas.save_png("atlas.png")?;
//! ```

pub mod atlas;
pub mod config;
pub mod error;
pub mod export;
pub mod luminance;
pub mod packer;
pub mod patch;
pub mod types;

// Re-export main types for convenience
pub use atlas::{generate_texture_atlases, AtlasBuilder, FinalizedAtlas, TextureAtlas};
pub use config::{AtlasConfig, MAX_TEXTURE_SIZE, MIN_TEXTURE_SIZE, PREF_TEXTURE_SIZE};
pub use error::{AtlasError, Result};
pub use export::metadata::AtlasMetadata;
pub use export::raw::{export_raw, RawAtlasData};
pub use luminance::{estimate_tone_mapping, ToneMapping};
pub use packer::{BinPacker, GuillotinePacker, ShelfPacker};
pub use patch::{load_manifest, TexturePatch};
pub use types::{FaceId, Rect, Texcoord};
