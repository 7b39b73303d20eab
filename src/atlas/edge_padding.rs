//! Dilation of valid atlas content into the surrounding padding.
//!
//! Texture filtering samples across patch borders, so the empty padding
//! around every patch is filled with colors grown outward from the patch
//! content. Each round grows the valid region by one ring of pixels.

use image::{GrayImage, Luma, Rgb, RgbImage};
use std::collections::BTreeSet;

/// Mask value of a valid pixel.
pub const VALID: u8 = 255;

/// 3x3 Gaussian, normalized.
const GAUSS: [[f32; 3]; 3] = [
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
];

/// 8-connected neighbours of (x, y) inside a `width` x `height` image,
/// with their kernel offsets.
fn neighbors(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> impl Iterator<Item = (u32, u32, usize, usize)> {
    (0..3usize)
        .flat_map(|j| (0..3usize).map(move |i| (i, j)))
        .filter(|&(i, j)| !(i == 1 && j == 1))
        .filter_map(move |(i, j)| {
            let nx = (x as i64) + i as i64 - 1;
            let ny = (y as i64) + j as i64 - 1;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                return None;
            }
            Some((nx as u32, ny as u32, i, j))
        })
}

fn is_valid(mask: &GrayImage, x: u32, y: u32) -> bool {
    mask.get_pixel(x, y).0[0] == VALID
}

fn has_valid_neighbor(mask: &GrayImage, x: u32, y: u32) -> bool {
    neighbors(x, y, mask.width(), mask.height()).any(|(nx, ny, _, _)| is_valid(mask, nx, ny))
}

/// Weighted average of the valid neighbours of (x, y), or `None` when no
/// neighbour is valid.
fn blend_valid_neighbors(image: &RgbImage, mask: &GrayImage, x: u32, y: u32) -> Option<[u8; 3]> {
    let mut norm = 0.0f32;
    let mut value = glam::Vec3::ZERO;

    for (nx, ny, i, j) in neighbors(x, y, image.width(), image.height()) {
        if !is_valid(mask, nx, ny) {
            continue;
        }
        let w = GAUSS[j][i];
        let [r, g, b] = image.get_pixel(nx, ny).0;
        norm += w;
        value += glam::Vec3::new(r as f32, g as f32, b as f32) * w;
    }

    if norm <= 0.0 {
        return None;
    }

    let value = value / norm;
    Some([value.x as u8, value.y as u8, value.z as u8])
}

/// Grow the valid region of `image` by `padding + 1` rings.
///
/// Pixels valid on entry are never modified. Every round computes all new
/// values against the mask as it was at the start of the round and only
/// then writes them, so the result does not depend on visiting order.
///
/// Returns the number of pixels that became valid.
pub fn apply_edge_padding(image: &mut RgbImage, mask: &mut GrayImage, padding: u32) -> usize {
    let width = image.width();
    let height = image.height();
    let index = |x: u32, y: u32| y as usize * width as usize + x as usize;

    // Invalid pixels at the border of the valid area
    let mut frontier: BTreeSet<usize> = BTreeSet::new();
    for y in 0..height {
        for x in 0..width {
            if !is_valid(mask, x, y) && has_valid_neighbor(mask, x, y) {
                frontier.insert(index(x, y));
            }
        }
    }

    let mut filled = 0usize;
    for round in 0..=padding {
        if frontier.is_empty() {
            break;
        }

        let updates: Vec<(u32, u32, [u8; 3])> = frontier
            .iter()
            .filter_map(|&idx| {
                let x = (idx % width as usize) as u32;
                let y = (idx / width as usize) as u32;
                blend_valid_neighbors(image, mask, x, y).map(|value| (x, y, value))
            })
            .collect();

        for &(x, y, value) in &updates {
            image.put_pixel(x, y, Rgb(value));
            mask.put_pixel(x, y, Luma([VALID]));
        }

        frontier.clear();
        for &(x, y, _) in &updates {
            for (nx, ny, _, _) in neighbors(x, y, width, height) {
                if !is_valid(mask, nx, ny) {
                    frontier.insert(index(nx, ny));
                }
            }
        }

        filled += updates.len();
        log::debug!(
            "Edge padding round {}: {} pixels filled, {} on frontier",
            round,
            updates.len(),
            frontier.len()
        );
    }

    filled
}
