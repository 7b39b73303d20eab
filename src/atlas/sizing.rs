//! Heuristic estimate of the atlas dimension before packing.

use crate::config::AtlasConfig;
use crate::patch::TexturePatch;

/// Fraction of the atlas area the padded patches may cover before the
/// estimate stops shrinking.
const MAX_UTILIZATION: f64 = 0.2;

/// Estimate a starting atlas dimension for the given patches.
///
/// `patches` must be sorted by descending pixel count. Starting at the
/// maximum size, the size is halved while the largest padded patch fits
/// into half of it and the padded patches cover less than a fifth of the
/// area. Once a patch's padding outweighs its content, it and all smaller
/// patches are left out of the area estimate.
///
/// Never returns less than `config.min_texture_size`. Nothing is packed.
pub fn calculate_texture_size(patches: &[TexturePatch], config: &AtlasConfig) -> u32 {
    let mut size = config.max_texture_size;

    loop {
        let padding = (size >> 7).min(config.sizing_padding_cap) as u64;

        let mut total_area = 0u64;
        let mut max_width = 0u64;
        let mut max_height = 0u64;

        for patch in patches {
            let width = patch.width() as u64 + 2 * padding;
            let height = patch.height() as u64 + 2 * padding;

            max_width = max_width.max(width);
            max_height = max_height.max(height);

            let area = width * height;
            let waste = area - patch.size();

            // Only patches where content dominates padding count
            if waste as f64 / patch.size() as f64 > 1.0 {
                break;
            }

            total_area += area;
        }

        if size <= config.min_texture_size {
            return config.min_texture_size;
        }

        let half = size as u64 / 2;
        let utilization = total_area as f64 / (size as f64 * size as f64);
        if max_width < half && max_height < half && utilization < MAX_UTILIZATION {
            size /= 2;
            continue;
        }

        return size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn create_test_patch(width: u32, height: u32) -> TexturePatch {
        let pixels = (width * height) as usize;
        TexturePatch::fully_valid(width, height, vec![0.5; pixels * 3], vec![0], vec![Vec2::ZERO; 3])
            .unwrap()
    }

    fn sorted(mut patches: Vec<TexturePatch>) -> Vec<TexturePatch> {
        patches.sort_by(|a, b| b.size().cmp(&a.size()));
        patches
    }

    #[test]
    fn test_empty_returns_minimum() {
        let config = AtlasConfig::default();
        assert_eq!(calculate_texture_size(&[], &config), 256);
    }

    #[test]
    fn test_small_patches_return_minimum() {
        let patches = sorted((0..10).map(|_| create_test_patch(8, 8)).collect());
        assert_eq!(calculate_texture_size(&patches, &AtlasConfig::default()), 256);
    }

    #[test]
    fn test_large_patch_bounds_size() {
        let patches = sorted(vec![create_test_patch(700, 300), create_test_patch(20, 20)]);
        let size = calculate_texture_size(&patches, &AtlasConfig::default());

        // 716 wide at 1024 is not below half of it, so shrinking stops
        assert_eq!(size, 1024);
        assert!(size >= 700 + 2 * (size >> 7).min(32));
    }

    #[test]
    fn test_utilization_stops_shrinking() {
        // 40 padded 100x100 patches cover more than a fifth of 1024x1024
        let patches = sorted((0..40).map(|_| create_test_patch(100, 100)).collect());
        let size = calculate_texture_size(&patches, &AtlasConfig::default());

        assert_eq!(size, 1024);
        let padding = (size >> 7).min(32) as u64;
        let padded = 100 + 2 * padding;
        let area = 40 * padded * padded;
        assert!(area as f64 / (size as f64 * size as f64) >= 0.2);
    }

    #[test]
    fn test_padding_dominated_patches_ignored() {
        // Thin slivers are all padding, only their extent matters
        let patches = sorted((0..1000).map(|_| create_test_patch(1, 120)).collect());
        assert_eq!(calculate_texture_size(&patches, &AtlasConfig::default()), 256);
    }

    #[test]
    fn test_bounded_by_config() {
        let config = AtlasConfig::default().with_max_texture_size(1024);
        let patches = sorted(vec![create_test_patch(1000, 1000)]);
        assert_eq!(calculate_texture_size(&patches, &config), 1024);

        let config = AtlasConfig::default().with_min_texture_size(512);
        assert_eq!(calculate_texture_size(&[], &config), 512);
    }
}
