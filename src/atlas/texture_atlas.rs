//! The texture atlas: an open raster that patches are inserted into, and
//! the finalized result.

use super::edge_padding::{apply_edge_padding, VALID};
use super::texcoords::{expand_texcoords, merge_texcoords};
use super::tone_map::{tone_map_patch, GammaTable};
use crate::error::{AtlasError, Result};
use crate::luminance::ToneMapping;
use crate::packer::{BinPacker, GuillotinePacker};
use crate::patch::TexturePatch;
use crate::types::{FaceId, Texcoord};
use glam::Vec2;
use image::{GrayImage, ImageEncoder, Luma, RgbImage};
use std::path::Path;

/// Padding around each patch for an atlas of the given size.
pub fn atlas_padding(size: u32) -> u32 {
    size >> 7
}

/// An atlas that still accepts patches.
///
/// Owns the raster, the validity mask and the bin packer. Calling
/// [`finalize`](Self::finalize) consumes it, so inserting into or finalizing
/// an atlas twice does not compile:
///
/// ```compile_fail
/// use patch_atlas::TextureAtlas;
///
/// let atlas: TextureAtlas = TextureAtlas::new(256);
/// let finalized = atlas.finalize();
/// let again = atlas.finalize();
/// ```
///
/// ```compile_fail
/// use patch_atlas::{TextureAtlas, TexturePatch, ToneMapping};
///
/// fn misuse(patch: &TexturePatch, tone: &ToneMapping) {
///     let atlas: TextureAtlas = TextureAtlas::new(256);
///     let mut finalized = atlas.finalize();
///     finalized.insert(patch, tone);
/// }
/// ```
pub struct TextureAtlas<P: BinPacker = GuillotinePacker> {
    size: u32,
    padding: u32,
    packer: P,
    image: RgbImage,
    validity_mask: GrayImage,
    faces: Vec<FaceId>,
    texcoords: Vec<Texcoord>,
    gamma: GammaTable,
}

impl<P: BinPacker> TextureAtlas<P> {
    /// Allocate an empty `size` x `size` atlas.
    pub fn new(size: u32) -> Self {
        let packer = P::new(size, size);
        debug_assert_eq!((packer.width(), packer.height()), (size, size));

        Self {
            size,
            padding: atlas_padding(size),
            packer,
            image: RgbImage::new(size, size),
            validity_mask: GrayImage::new(size, size),
            faces: Vec::new(),
            texcoords: Vec::new(),
            gamma: GammaTable::default(),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Faces inserted so far.
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Normalized texture coordinates inserted so far, three per face.
    pub fn texcoords(&self) -> &[Texcoord] {
        &self.texcoords
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn validity_mask(&self) -> &GrayImage {
        &self.validity_mask
    }

    /// Tone map a patch and place it into the atlas.
    ///
    /// Returns `false` if the packer has no room for the patch plus its
    /// padding. A failed insertion leaves no trace, but earlier placements
    /// cannot be undone either; callers that need more room start over
    /// with a larger atlas.
    pub fn insert(&mut self, patch: &TexturePatch, tone: &ToneMapping) -> bool {
        let padded_width = patch.width().saturating_add(2 * self.padding);
        let padded_height = patch.height().saturating_add(2 * self.padding);
        let rect = match self.packer.insert(padded_width, padded_height) {
            Some(rect) => rect,
            None => return false,
        };

        let x = (rect.x + self.padding) as i64;
        let y = (rect.y + self.padding) as i64;

        let patch_image = tone_map_patch(patch, tone, &self.gamma);
        let patch_mask = GrayImage::from_fn(patch.width(), patch.height(), |px, py| {
            Luma([if patch.is_valid(px, py) { VALID } else { 0 }])
        });
        image::imageops::replace(&mut self.image, &patch_image, x, y);
        image::imageops::replace(&mut self.validity_mask, &patch_mask, x, y);

        let offset = Vec2::new(x as f32, y as f32);
        let size = self.size as f32;
        self.faces.extend_from_slice(patch.faces());
        self.texcoords
            .extend(patch.texcoords().iter().map(|&tc| (tc + offset) / size));

        true
    }

    /// Seal the atlas: drop the packer, dilate patch content into the
    /// padding, drop the validity mask and deduplicate texture coordinates.
    pub fn finalize(self) -> FinalizedAtlas {
        let TextureAtlas {
            size,
            padding,
            packer,
            mut image,
            mut validity_mask,
            faces,
            texcoords,
            ..
        } = self;

        drop(packer);
        let filled = apply_edge_padding(&mut image, &mut validity_mask, padding);
        drop(validity_mask);
        let (unique, texcoord_ids) = merge_texcoords(&texcoords);

        log::info!(
            "Finalized {}x{} atlas: {} faces, {} of {} texcoords unique, {} padding pixels filled",
            size,
            size,
            faces.len(),
            unique.len(),
            texcoords.len(),
            filled
        );

        FinalizedAtlas {
            size,
            padding,
            image,
            faces,
            texcoords: unique,
            texcoord_ids,
        }
    }
}

/// A finished atlas: gamma corrected 8-bit RGB raster, the faces it
/// textures and their deduplicated texture coordinates.
#[derive(Debug, Clone)]
pub struct FinalizedAtlas {
    size: u32,
    padding: u32,
    image: RgbImage,
    faces: Vec<FaceId>,
    texcoords: Vec<Texcoord>,
    texcoord_ids: Vec<usize>,
}

impl FinalizedAtlas {
    /// Width and height of the raster in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Unique normalized texture coordinates.
    pub fn texcoords(&self) -> &[Texcoord] {
        &self.texcoords
    }

    /// Index into [`texcoords`](Self::texcoords) for every face vertex,
    /// three per face in face order.
    pub fn texcoord_ids(&self) -> &[usize] {
        &self.texcoord_ids
    }

    /// Texture coordinate of every face vertex.
    pub fn expanded_texcoords(&self) -> Vec<Texcoord> {
        expand_texcoords(&self.texcoords, &self.texcoord_ids)
    }

    /// Export the atlas as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let cursor = std::io::Cursor::new(&mut bytes);
        let encoder = image::codecs::png::PngEncoder::new(cursor);

        encoder
            .write_image(
                self.image.as_raw(),
                self.size,
                self.size,
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| AtlasError::AtlasBuild(format!("Failed to encode PNG: {}", e)))?;

        Ok(bytes)
    }

    /// Write the atlas as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_png()?)?;
        Ok(())
    }
}
