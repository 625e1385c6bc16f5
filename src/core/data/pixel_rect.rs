use crate::core::data::point::Point;

/// An axis-aligned pixel region. A rect may be empty, which is how a
/// minimized framebuffer is reported.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    top_left: Point,
    width: u32,
    height: u32,
}

impl PixelRect {
    #[must_use]
    pub fn new(top_left: Point, width: u32, height: u32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Equivalent to `rect(0, 0, width, height)`.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(Point { x: 0, y: 0 }, width, height)
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        let dx = i64::from(point.x) - i64::from(self.top_left.x);
        let dy = i64::from(point.y) - i64::from(self.top_left.y);

        dx >= 0 && dy >= 0 && dx < i64::from(self.width) && dy < i64::from(self.height)
    }

    /// Integer-divides both dimensions, anchoring the result at the origin.
    #[must_use]
    pub fn divided_by(&self, divisor: u32) -> Self {
        Self::from_size(self.width / divisor, self.height / divisor)
    }
}
