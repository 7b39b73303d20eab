//! Shared types used throughout the library.

mod rect;

pub use rect::Rect;

/// Identifier of a mesh face supplied by the patch producer.
pub type FaceId = usize;

/// A 2D texture coordinate.
///
/// Patch-local coordinates are unnormalized pixel positions, atlas
/// coordinates are normalized to `[0, 1]`.
pub type Texcoord = glam::Vec2;
