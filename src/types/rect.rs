/// An axis-aligned rectangle in integer pixel space.
///
/// `x`/`y` is the top-left corner, the rectangle covers
/// `x..x + width` and `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    pub fn max_x(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn max_y(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check whether a `width` x `height` rectangle fits inside this one.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }

    /// Check if two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// Check if `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&Rect::new(0, 10, 5, 5)));
    }

    #[test]
    fn test_contains() {
        let outer = Rect::new(0, 0, 16, 16);
        assert!(outer.contains(&Rect::new(4, 4, 12, 12)));
        assert!(!outer.contains(&Rect::new(4, 4, 13, 12)));
        assert_eq!(outer.area(), 256);
    }
}
