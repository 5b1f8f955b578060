use crate::geometry::{PixelMask, Point, NEIGHBORS_4};
use image::GrayImage;
use std::collections::VecDeque;
use tracing::debug;

/// How a fill reacts when the seed pixel falls outside the expected band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPolicy {
    /// An out-of-band seed turns the fill into a no-op.
    Strict,
    /// An out-of-band seed recenters the band on the seed's actual value.
    /// Useful when the backdrop brightness drifts between captures but the
    /// seed corner is known to sit on it.
    Adaptive,
}

/// Flood-fills the 4-connected region around `seed` whose values lie in the
/// open band `(expected - tolerance, expected + tolerance)`, painting every
/// matched pixel with `substitute`.
///
/// Returns the repainted grid and the mask of filled pixels in visit order;
/// the input is untouched. Pixels already holding `substitute` are never
/// refilled, so the mask is duplicate-free and the fill always terminates.
/// A seed outside the grid yields the unchanged clone and an empty mask.
pub fn flood_fill(
    grid: &GrayImage,
    seed: Point,
    expected: u8,
    substitute: u8,
    tolerance: u8,
    policy: FillPolicy,
) -> (GrayImage, PixelMask) {
    let mut out = grid.clone();
    let mut mask = PixelMask::new();

    let Some(seed_value) = out.get_pixel_checked(seed.x, seed.y).map(|p| p[0]) else {
        debug!("Fill seed ({}, {}) is outside the grid", seed.x, seed.y);
        return (out, mask);
    };

    let tolerance = tolerance as i32;
    let in_band = |value: u8, center: i32| {
        let v = value as i32;
        v > center - tolerance && v < center + tolerance
    };

    let mut center = expected as i32;
    match policy {
        FillPolicy::Strict => {
            if !in_band(seed_value, center) {
                debug!("Seed value {} outside strict band around {}", seed_value, center);
                return (out, mask);
            }
        }
        FillPolicy::Adaptive => {
            if !in_band(seed_value, center) {
                debug!("Recentering fill band from {} to seed value {}", center, seed_value);
                center = seed_value as i32;
            }
            // A band that admits the substitute itself would repaint the
            // region with its own color and mask pixels that never changed.
            if (center - substitute as i32).abs() <= tolerance {
                debug!(
                    "Fill band around {} collides with substitute {}, skipping",
                    center, substitute
                );
                return (out, mask);
            }
        }
    }

    let (width, height) = (out.width() as i32, out.height() as i32);
    let mut queue = VecDeque::new();
    out.put_pixel(seed.x, seed.y, image::Luma([substitute]));
    mask.push(seed);
    queue.push_back(seed);

    while let Some(current) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS_4 {
            let nx = current.x as i32 + dx;
            let ny = current.y as i32 + dy;
            if nx < 0 || nx >= width || ny < 0 || ny >= height {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            let value = out.get_pixel(nx, ny)[0];
            if value != substitute && in_band(value, center) {
                let point = Point::new(nx, ny);
                out.put_pixel(nx, ny, image::Luma([substitute]));
                mask.push(point);
                queue.push_back(point);
            }
        }
    }

    (out, mask)
}
