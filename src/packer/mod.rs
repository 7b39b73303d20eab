//! Rectangle bin packing.
//!
//! A [`BinPacker`] owns a fixed rectangular region and hands out
//! non-overlapping placements until the region is exhausted. Packers are
//! stateful and not transactional: there is no way to take a placement
//! back, so callers that need to retry start over with a fresh packer.

mod guillotine;
mod shelf;

pub use guillotine::GuillotinePacker;
pub use shelf::ShelfPacker;

use crate::types::Rect;

/// A 2D rectangle bin packer over a fixed region.
pub trait BinPacker {
    /// Create a packer over a fresh `width` x `height` region.
    fn new(width: u32, height: u32) -> Self
    where
        Self: Sized;

    /// Place a `width` x `height` rectangle.
    ///
    /// Returns the assigned rectangle, or `None` if no free space of the
    /// requested size remains.
    fn insert(&mut self, width: u32, height: u32) -> Option<Rect>;

    /// Width of the packed region.
    fn width(&self) -> u32;

    /// Height of the packed region.
    fn height(&self) -> u32;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Insert all sizes and check that every placement lies inside the
    /// region and no two placements overlap.
    pub fn assert_disjoint_placements<P: BinPacker>(sizes: &[(u32, u32)], side: u32) -> Vec<Rect> {
        let mut packer = P::new(side, side);
        let bounds = Rect::new(0, 0, side, side);
        let mut placed: Vec<Rect> = Vec::new();

        for &(w, h) in sizes {
            if let Some(rect) = packer.insert(w, h) {
                assert_eq!((rect.width, rect.height), (w, h));
                assert!(bounds.contains(&rect), "{:?} outside region", rect);
                for other in &placed {
                    assert!(!rect.intersects(other), "{:?} overlaps {:?}", rect, other);
                }
                placed.push(rect);
            }
        }

        placed
    }
}
