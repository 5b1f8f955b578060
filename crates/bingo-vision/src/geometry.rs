use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offsets of the four edge-sharing neighbors.
pub const NEIGHBORS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Pixel coordinate inside a grid, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box with inclusive corners: `max` is the last pixel inside,
/// not one past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> u32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> u32 {
        self.max.y - self.min.y + 1
    }

    /// Corner-to-corner span product, the artifact metric used when filtering
    /// labeled regions. A single pixel spans zero.
    pub fn span_area(&self) -> u32 {
        (self.max.x - self.min.x) * (self.max.y - self.min.y)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Grow to cover `point` as well.
    pub fn expand(&mut self, point: Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})..({}, {})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

/// Pixels belonging to one region, in discovery order.
pub type PixelMask = Vec<Point>;

/// Resolves an optional scan window to `(x0, y0, x1, y1)` with an exclusive
/// bottom-right corner. Without a window the scan stops one pixel short of
/// the right and bottom image edges.
pub(crate) fn scan_window(
    grid: &GrayImage,
    window: Option<(Point, Point)>,
) -> (u32, u32, u32, u32) {
    match window {
        Some((top_left, bot_right)) => (top_left.x, top_left.y, bot_right.x, bot_right.y),
        None => (
            0,
            0,
            grid.width().saturating_sub(1),
            grid.height().saturating_sub(1),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_dimensions() {
        let bb = BoundingBox::new(Point::new(5, 5), Point::new(14, 14));
        assert_eq!(bb.width(), 10, "inclusive corners should span 10 columns");
        assert_eq!(bb.height(), 10);
        assert_eq!(bb.span_area(), 81, "span product excludes the +1");
    }

    #[test]
    fn test_single_pixel_box_spans_zero() {
        let bb = BoundingBox::new(Point::new(3, 7), Point::new(3, 7));
        assert_eq!(bb.width(), 1);
        assert_eq!(bb.span_area(), 0);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bb = BoundingBox::new(Point::new(2, 2), Point::new(6, 4));
        assert!(bb.contains(Point::new(2, 2)));
        assert!(bb.contains(Point::new(6, 4)));
        assert!(!bb.contains(Point::new(7, 4)));
        assert!(!bb.contains(Point::new(6, 5)));
    }

    #[test]
    fn test_expand_tracks_extremes() {
        let mut bb = BoundingBox::new(Point::new(4, 4), Point::new(4, 4));
        bb.expand(Point::new(1, 6));
        bb.expand(Point::new(9, 2));
        assert_eq!(bb.min, Point::new(1, 2));
        assert_eq!(bb.max, Point::new(9, 6));
    }

    #[test]
    fn test_default_scan_window_excludes_last_row_and_column() {
        let grid = GrayImage::new(10, 6);
        assert_eq!(scan_window(&grid, None), (0, 0, 9, 5));
    }

    #[test]
    fn test_display_shows_both_corners() {
        let bb = BoundingBox::new(Point::new(2, 3), Point::new(10, 12));
        assert_eq!(bb.to_string(), "(2, 3)..(10, 12)");
    }
}
