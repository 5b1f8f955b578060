use crate::geometry::{scan_window, BoundingBox, Point, NEIGHBORS_4};
use crate::intensity::shift;
use crate::MAX_PANELS;
use image::GrayImage;
use std::collections::VecDeque;
use tracing::debug;

/// Finds 4-connected foreground components and returns their inclusive
/// bounding boxes in row-major discovery order.
///
/// Labeling works on a copy shifted up by [`MAX_PANELS`], which splits the
/// value space three ways: `background` stays background, values at or below
/// `MAX_PANELS` are already-assigned region ids, and anything above is
/// unlabeled foreground. Ids saturate at `MAX_PANELS - 1` so a pathological
/// frame cannot push labels back into the foreground range.
///
/// Components whose corner-to-corner span product is below `min_span_area`
/// are dropped as artifacts (text fragments, stray marks). The scan window's
/// bottom-right corner is exclusive, but a region seeded inside the window
/// may grow past it; only the image border stops the growth.
pub fn label_regions(
    grid: &GrayImage,
    window: Option<(Point, Point)>,
    background: u8,
    min_span_area: u32,
) -> Vec<BoundingBox> {
    let mut labeled = shift(grid, MAX_PANELS as i16, false);
    let (x0, y0, x1, y1) = scan_window(grid, window);

    let mut boxes: Vec<BoundingBox> = Vec::new();
    for y in y0..y1 {
        for x in x0..x1 {
            let value = labeled.get_pixel(x, y)[0];
            if value == background || value <= MAX_PANELS {
                continue;
            }
            let id = boxes.len().min(MAX_PANELS as usize - 1) as u8;
            let bounds = grow_region(&mut labeled, Point::new(x, y), id, background);
            if bounds.span_area() < min_span_area {
                debug!("Dropping artifact region {}", bounds);
                continue;
            }
            boxes.push(bounds);
        }
    }
    debug!("Labeled {} region(s)", boxes.len());
    boxes
}

/// Stamps `id` over the component containing `start` and returns its bounds.
fn grow_region(labeled: &mut GrayImage, start: Point, id: u8, background: u8) -> BoundingBox {
    let (width, height) = (labeled.width() as i32, labeled.height() as i32);
    let mut bounds = BoundingBox::new(start, start);
    let mut queue = VecDeque::new();

    labeled.put_pixel(start.x, start.y, image::Luma([id]));
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS_4 {
            let nx = current.x as i32 + dx;
            let ny = current.y as i32 + dy;
            if nx < 0 || nx >= width || ny < 0 || ny >= height {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            let value = labeled.get_pixel(nx, ny)[0];
            if value == background || value <= MAX_PANELS {
                continue;
            }
            let point = Point::new(nx, ny);
            labeled.put_pixel(nx, ny, image::Luma([id]));
            bounds.expand(point);
            queue.push_back(point);
        }
    }
    bounds
}
