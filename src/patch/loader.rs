//! Texture patch loading from image files and JSON manifests.

use super::TexturePatch;
use crate::error::{AtlasError, Result};
use crate::types::{FaceId, Texcoord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A JSON description of a set of patches stored as image files.
///
/// ```json
/// {
///   "patches": [
///     { "image": "patch_0.hdr", "faces": [0, 1], "texcoords": [[0, 0], [4, 0], ...] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchManifest {
    pub patches: Vec<PatchEntry>,
}

/// One manifest entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchEntry {
    /// Image path, relative to the manifest file.
    pub image: PathBuf,
    pub faces: Vec<FaceId>,
    /// Patch-local pixel coordinates, three per face.
    pub texcoords: Vec<Texcoord>,
}

/// Decode a patch from encoded image bytes.
///
/// Any format the `image` crate was built with is accepted (PNG, Radiance
/// HDR). Radiance is read as RGB floats; 8-bit sources are normalized to
/// `[0, 1]`. Pixels with a zero alpha are marked invalid, formats without
/// alpha are fully valid.
pub fn load_patch_from_bytes(
    data: &[u8],
    faces: Vec<FaceId>,
    texcoords: Vec<Texcoord>,
) -> Result<TexturePatch> {
    let img = image::load_from_memory(data)?;
    let rgba = img.to_rgba32f();
    let (width, height) = rgba.dimensions();

    let pixel_count = width as usize * height as usize;
    let mut radiance = Vec::with_capacity(pixel_count * 3);
    let mut mask = Vec::with_capacity(pixel_count);

    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        radiance.extend_from_slice(&[r, g, b]);
        mask.push(a > 0.0);
    }

    TexturePatch::new(width, height, radiance, mask, faces, texcoords)
}

/// Load a patch from an image file.
pub fn load_patch_from_path<P: AsRef<Path>>(
    path: P,
    faces: Vec<FaceId>,
    texcoords: Vec<Texcoord>,
) -> Result<TexturePatch> {
    let data = std::fs::read(path.as_ref())?;
    load_patch_from_bytes(&data, faces, texcoords)
}

/// Load every patch listed in a manifest file.
///
/// Entries without faces are skipped since they cannot be referenced by
/// any texture coordinate.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<TexturePatch>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let manifest: PatchManifest = serde_json::from_str(&contents)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut patches = Vec::with_capacity(manifest.patches.len());
    for entry in manifest.patches {
        if entry.faces.is_empty() {
            log::warn!("Skipping patch {:?}: no faces", entry.image);
            continue;
        }

        let image_path = base.join(&entry.image);
        let patch = load_patch_from_path(&image_path, entry.faces, entry.texcoords).map_err(
            |e| match e {
                AtlasError::MalformedPatch(msg) => {
                    AtlasError::MalformedPatch(format!("{}: {}", image_path.display(), msg))
                }
                other => other,
            },
        )?;
        patches.push(patch);
    }

    Ok(patches)
}
