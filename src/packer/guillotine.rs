//! Guillotine packing with best-area-fit placement.

use super::BinPacker;
use crate::types::Rect;

/// Keeps a list of disjoint free rectangles. Each placement goes into the
/// free rectangle that leaves the least area over, and the remainder is cut
/// into two new free rectangles along the shorter leftover axis.
#[derive(Debug, Clone)]
pub struct GuillotinePacker {
    width: u32,
    height: u32,
    free: Vec<Rect>,
}

impl GuillotinePacker {
    fn best_fit(&self, width: u32, height: u32) -> Option<usize> {
        let needed = width as u64 * height as u64;
        self.free
            .iter()
            .enumerate()
            .filter(|(_, r)| r.fits(width, height))
            .min_by_key(|(_, r)| {
                let short_side = (r.width - width).min(r.height - height);
                (r.area() - needed, short_side)
            })
            .map(|(i, _)| i)
    }
}

impl BinPacker for GuillotinePacker {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            free: vec![Rect::new(0, 0, width, height)],
        }
    }

    fn insert(&mut self, width: u32, height: u32) -> Option<Rect> {
        let index = self.best_fit(width, height)?;
        let free = self.free.swap_remove(index);
        let placed = Rect::new(free.x, free.y, width, height);

        let leftover_w = free.width - width;
        let leftover_h = free.height - height;

        let (right, bottom) = if leftover_w < leftover_h {
            (
                Rect::new(free.x + width, free.y, leftover_w, height),
                Rect::new(free.x, free.y + height, free.width, leftover_h),
            )
        } else {
            (
                Rect::new(free.x + width, free.y, leftover_w, free.height),
                Rect::new(free.x, free.y + height, width, leftover_h),
            )
        };

        for split in [right, bottom] {
            if split.area() > 0 {
                self.free.push(split);
            }
        }

        Some(placed)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::test_support::assert_disjoint_placements;

    #[test]
    fn test_exact_fill() {
        let mut packer = GuillotinePacker::new(64, 64);
        for _ in 0..16 {
            assert!(packer.insert(16, 16).is_some());
        }
        assert!(packer.insert(1, 1).is_none());
        assert!(packer.free.is_empty());
    }

    #[test]
    fn test_too_large() {
        let mut packer = GuillotinePacker::new(32, 32);
        assert_eq!((packer.width(), packer.height()), (32, 32));
        assert!(packer.insert(33, 1).is_none());
        assert!(packer.insert(32, 32).is_some());
    }

    #[test]
    fn test_mixed_sizes_disjoint() {
        let sizes: Vec<(u32, u32)> = (1..40).map(|i| (3 + (i * 7) % 29, 2 + (i * 13) % 23)).collect();
        let placed = assert_disjoint_placements::<GuillotinePacker>(&sizes, 128);
        assert!(!placed.is_empty());
    }

    #[test]
    fn test_best_area_fit_reuses_hole() {
        let mut packer = GuillotinePacker::new(100, 10);
        let first = packer.insert(90, 10).unwrap();
        assert_eq!((first.x, first.y), (0, 0));

        // Only the 10x10 remainder is left
        let second = packer.insert(10, 10).unwrap();
        assert_eq!((second.x, second.y), (90, 0));
        assert!(packer.insert(1, 1).is_none());
    }
}
