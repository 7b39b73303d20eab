//! Texture patches: rectangular HDR image fragments covering mesh faces.

pub mod loader;

pub use loader::{load_manifest, load_patch_from_bytes, load_patch_from_path, PatchManifest};

use crate::error::{AtlasError, Result};
use crate::types::{FaceId, Texcoord};

/// A rendered, rectangular piece of texture for a set of mesh faces.
///
/// Holds linear RGB radiance, a validity mask and the per-face-vertex
/// texture coordinates in patch-local pixel space (three per face, in
/// face order). All invariants are checked on construction.
#[derive(Debug, Clone)]
pub struct TexturePatch {
    width: u32,
    height: u32,
    image: Vec<f32>,
    validity_mask: Vec<bool>,
    faces: Vec<FaceId>,
    texcoords: Vec<Texcoord>,
}

impl TexturePatch {
    /// Create a patch from raw radiance (3 floats per pixel) and mask data.
    pub fn new(
        width: u32,
        height: u32,
        image: Vec<f32>,
        validity_mask: Vec<bool>,
        faces: Vec<FaceId>,
        texcoords: Vec<Texcoord>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AtlasError::MalformedPatch(format!(
                "patch dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        let pixels = width as usize * height as usize;
        if image.len() != pixels * 3 {
            return Err(AtlasError::MalformedPatch(format!(
                "expected {} radiance values for {}x{} patch, got {}",
                pixels * 3,
                width,
                height,
                image.len()
            )));
        }
        if validity_mask.len() != pixels {
            return Err(AtlasError::MalformedPatch(format!(
                "expected {} mask entries for {}x{} patch, got {}",
                pixels,
                width,
                height,
                validity_mask.len()
            )));
        }
        if texcoords.len() != faces.len() * 3 {
            return Err(AtlasError::MalformedPatch(format!(
                "{} faces need {} texcoords, got {}",
                faces.len(),
                faces.len() * 3,
                texcoords.len()
            )));
        }

        Ok(Self {
            width,
            height,
            image,
            validity_mask,
            faces,
            texcoords,
        })
    }

    /// Create a patch where every pixel carries content.
    pub fn fully_valid(
        width: u32,
        height: u32,
        image: Vec<f32>,
        faces: Vec<FaceId>,
        texcoords: Vec<Texcoord>,
    ) -> Result<Self> {
        let mask = vec![true; width as usize * height as usize];
        Self::new(width, height, image, mask, faces, texcoords)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn size(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Linear RGB radiance, row-major, 3 floats per pixel.
    pub fn image(&self) -> &[f32] {
        &self.image
    }

    /// Per-pixel validity, row-major.
    pub fn validity_mask(&self) -> &[bool] {
        &self.validity_mask
    }

    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    pub fn texcoords(&self) -> &[Texcoord] {
        &self.texcoords
    }

    /// Get the radiance at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the patch.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 3] {
        debug_assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.image[idx], self.image[idx + 1], self.image[idx + 2]]
    }

    /// Check whether (x, y) carries real content.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the patch.
    pub fn is_valid(&self, x: u32, y: u32) -> bool {
        debug_assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.validity_mask[y as usize * self.width as usize + x as usize]
    }

    /// Count of pixels marked valid.
    pub fn valid_pixel_count(&self) -> usize {
        self.validity_mask.iter().filter(|&&v| v).count()
    }
}
