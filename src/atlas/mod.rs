//! Texture atlas building.
//!
//! Patches are tone mapped and packed into one square raster, the padding
//! around them is filled by dilation, and their texture coordinates are
//! remapped into the atlas and deduplicated.

mod builder;
pub mod edge_padding;
pub mod sizing;
pub mod texcoords;
mod texture_atlas;
pub mod tone_map;

pub use builder::{generate_texture_atlases, AtlasBuilder};
pub use sizing::calculate_texture_size;
pub use texture_atlas::{atlas_padding, FinalizedAtlas, TextureAtlas};
