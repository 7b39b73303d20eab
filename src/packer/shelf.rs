//! Simple row ("shelf") packing.

use super::BinPacker;
use crate::types::Rect;

/// Places rectangles left to right in rows. A new row starts below the
/// tallest rectangle of the current one when the next rectangle does not
/// fit horizontally. Works best when fed tallest-first.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    width: u32,
    height: u32,
    current_x: u32,
    current_y: u32,
    row_height: u32,
}

impl BinPacker for ShelfPacker {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            current_x: 0,
            current_y: 0,
            row_height: 0,
        }
    }

    fn insert(&mut self, width: u32, height: u32) -> Option<Rect> {
        if width > self.width {
            return None;
        }

        // Check if we need to start a new row
        let (x, y, row_height) = if self.current_x + width > self.width {
            (0, self.current_y + self.row_height, 0)
        } else {
            (self.current_x, self.current_y, self.row_height)
        };

        // Check if we've run out of space
        if y + height > self.height {
            return None;
        }

        self.current_x = x + width;
        self.current_y = y;
        self.row_height = row_height.max(height);

        Some(Rect::new(x, y, width, height))
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
    fn test_rows() {
        let mut packer = ShelfPacker::new(32, 32);
        assert_eq!((packer.width(), packer.height()), (32, 32));
        assert_eq!(packer.insert(20, 10), Some(Rect::new(0, 0, 20, 10)));
        assert_eq!(packer.insert(12, 5), Some(Rect::new(20, 0, 12, 5)));
        assert_eq!(packer.insert(10, 10), Some(Rect::new(0, 10, 10, 10)));
    }

    #[test]
    fn test_failed_insert_keeps_state() {
        let mut packer = ShelfPacker::new(16, 16);
        assert!(packer.insert(16, 12).is_some());
        assert!(packer.insert(8, 8).is_none());
        assert_eq!(packer.insert(8, 4), Some(Rect::new(0, 12, 8, 4)));
    }

    #[test]
    fn test_mixed_sizes_disjoint() {
        let mut sizes: Vec<(u32, u32)> = (1..40).map(|i| (3 + (i * 7) % 29, 2 + (i * 13) % 23)).collect();
        sizes.sort_by(|a, b| b.1.cmp(&a.1));
        let placed = assert_disjoint_placements::<ShelfPacker>(&sizes, 128);
        assert!(!placed.is_empty());
    }
}
