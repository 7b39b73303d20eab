//! Texture atlas builder: sort, estimate, pack, grow and restart.

use super::sizing::calculate_texture_size;
use super::texture_atlas::{FinalizedAtlas, TextureAtlas};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::luminance::ToneMapping;
use crate::packer::{BinPacker, GuillotinePacker};
use crate::patch::TexturePatch;
use std::marker::PhantomData;

/// Builder for packing texture patches into a single atlas.
pub struct AtlasBuilder<P: BinPacker = GuillotinePacker> {
    config: AtlasConfig,
    _packer: PhantomData<P>,
}

impl AtlasBuilder {
    /// Create a new atlas builder using the default packer.
    pub fn new(config: AtlasConfig) -> Self {
        Self::with_config(config)
    }
}

impl Default for AtlasBuilder {
    fn default() -> Self {
        Self::new(AtlasConfig::default())
    }
}

impl<P: BinPacker> AtlasBuilder<P> {
    /// Create a new atlas builder for any packer.
    pub fn with_config(config: AtlasConfig) -> Self {
        Self {
            config,
            _packer: PhantomData,
        }
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Pack all patches into one atlas.
    ///
    /// Patches are sorted by descending size and inserted into an atlas of
    /// the estimated size. Whenever a patch does not fit, the atlas is
    /// thrown away and packing restarts from the first patch at twice the
    /// size. Fails with [`AtlasError::MaxTextureSizeExceeded`] once the
    /// size would exceed the configured maximum.
    pub fn build(&self, mut patches: Vec<TexturePatch>, tone: &ToneMapping) -> Result<FinalizedAtlas> {
        self.config.validate()?;

        log::info!("Sorting {} texture patches...", patches.len());
        // Large patches first improves packing; equal sizes go last-in first
        patches.reverse();
        patches.sort_by(|a, b| b.size().cmp(&a.size()));

        let mut texture_size = calculate_texture_size(&patches, &self.config);
        log::info!("Estimated atlas size: {}x{}", texture_size, texture_size);

        let total = patches.len();
        'attempt: loop {
            let mut atlas: TextureAtlas<P> = TextureAtlas::new(texture_size);

            for (done, patch) in patches.iter().enumerate() {
                if self.config.report_progress {
                    report_progress(done, total);
                }

                if !atlas.insert(patch, tone) {
                    texture_size = texture_size.saturating_mul(2);
                    if texture_size > self.config.max_texture_size {
                        log::error!(
                            "Exceeded maximum texture size ({})",
                            self.config.max_texture_size
                        );
                        return Err(AtlasError::MaxTextureSizeExceeded {
                            max: self.config.max_texture_size,
                        });
                    }

                    log::info!(
                        "Atlas too small after {} of {} patches, restarting at {}x{}",
                        done,
                        total,
                        texture_size,
                        texture_size
                    );
                    continue 'attempt;
                }
            }

            return Ok(atlas.finalize());
        }
    }
}

fn report_progress(done: usize, total: usize) {
    if total <= 100 || done % (total / 100) != 0 {
        return;
    }
    let percent = done * 100 / total;
    log::info!("Working on atlas {}%...", percent);
}

/// Pack every patch of `patches` into texture atlases with the default
/// configuration, leaving `patches` empty.
///
/// All patches always end up in exactly one atlas, so the result holds a
/// single element.
pub fn generate_texture_atlases(
    patches: &mut Vec<TexturePatch>,
    tone: &ToneMapping,
) -> Result<Vec<FinalizedAtlas>> {
    let patches = std::mem::take(patches);
    let atlas = AtlasBuilder::default().build(patches, tone)?;
    Ok(vec![atlas])
}
