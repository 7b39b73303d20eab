//! HDR to 8-bit conversion of patch radiance.

use crate::luminance::ToneMapping;
use crate::patch::TexturePatch;
use image::{Rgb, RgbImage};

/// Gamma applied to the tone mapped atlas content.
pub const ATLAS_GAMMA: f32 = 1.0 / 2.2;

/// Map one radiance value to `[0, 255]` with the global Reinhard operator.
///
/// Negative radiance is clamped to zero first. See Reinhard et al.,
/// "Photographic tone reproduction for digital images", SIGGRAPH 2002.
pub fn reinhard(value: f32, tone: &ToneMapping) -> u8 {
    let max_2 = tone.max() * tone.max();

    let v = value.max(0.0);
    let v = (0.18 / tone.mean()) * v;
    let v = (v * (1.0 + v / max_2)) / (1.0 + v);

    (v * 255.0).clamp(0.0, 255.0) as u8
}

/// Lookup table for gamma correcting 8-bit values.
#[derive(Debug, Clone)]
pub struct GammaTable {
    lookup: [u8; 256],
}

impl GammaTable {
    pub fn new(power: f32) -> Self {
        let mut lookup = [0u8; 256];
        for (i, entry) in lookup.iter_mut().enumerate() {
            *entry = ((i as f32 / 255.0).powf(power) * 255.0 + 0.5) as u8;
        }
        Self { lookup }
    }

    pub fn apply(&self, value: u8) -> u8 {
        self.lookup[value as usize]
    }

    /// Correct every value of a buffer in place.
    pub fn apply_all(&self, values: &mut [u8]) {
        for v in values {
            *v = self.lookup[*v as usize];
        }
    }
}

impl Default for GammaTable {
    fn default() -> Self {
        Self::new(ATLAS_GAMMA)
    }
}

/// Tone map the valid pixels of a patch into an 8-bit, gamma corrected
/// buffer. Invalid pixels stay black.
pub fn tone_map_patch(patch: &TexturePatch, tone: &ToneMapping, gamma: &GammaTable) -> RgbImage {
    let mut out = RgbImage::new(patch.width(), patch.height());

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if !patch.is_valid(x, y) {
            continue;
        }
        let [r, g, b] = patch.pixel(x, y);
        *pixel = Rgb([reinhard(r, tone), reinhard(g, tone), reinhard(b, tone)]);
    }

    gamma.apply_all(&mut out);
    out
}
