use crate::geometry::{scan_window, Point};
use crate::BACKGROUND;
use image::GrayImage;

/// Grows the background sentinel: a scanned pixel becomes 255 when any input
/// pixel under the disk kernel is 255, otherwise it keeps its input value.
/// Foreground thinner than the kernel radius is wiped out entirely.
///
/// The kernel is the strict disk `ix*ix + iy*iy < radius*radius`, so a
/// radius of 1 covers only the center pixel and the pass is the identity.
/// The window's bottom-right corner is exclusive; without a window the scan
/// stops one pixel short of the right and bottom edges, and unscanned pixels
/// are copied through unchanged. Kernel taps outside the grid are ignored.
pub fn erode(grid: &GrayImage, radius: u32, window: Option<(Point, Point)>) -> GrayImage {
    let mut out = grid.clone();
    let (x0, y0, x1, y1) = scan_window(grid, window);
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    let r = radius as i32;

    for y in y0..y1 {
        for x in x0..x1 {
            if disk_touches_background(grid, x as i32, y as i32, r, width, height) {
                out.put_pixel(x, y, image::Luma([BACKGROUND]));
            }
        }
    }
    out
}

fn disk_touches_background(
    grid: &GrayImage,
    cx: i32,
    cy: i32,
    r: i32,
    width: i32,
    height: i32,
) -> bool {
    for iy in -r..=r {
        for ix in -r..=r {
            if ix * ix + iy * iy >= r * r {
                continue;
            }
            let nx = cx + ix;
            let ny = cy + iy;
            if nx < 0 || nx >= width || ny < 0 || ny >= height {
                continue;
            }
            if grid.get_pixel(nx as u32, ny as u32)[0] == BACKGROUND {
                return true;
            }
        }
    }
    false
}

/// Morphological closing step: every scanned pixel takes the minimum input
/// value under the disk kernel. Since foreground is darker than the 255
/// sentinel this bridges small gaps between nearby foreground blobs, fusing
/// an icon's ring back together after erosion has nibbled it apart.
///
/// Same kernel and window semantics as [`erode`].
pub fn close(grid: &GrayImage, radius: u32, window: Option<(Point, Point)>) -> GrayImage {
    let mut out = grid.clone();
    let (x0, y0, x1, y1) = scan_window(grid, window);
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    let r = radius as i32;

    for y in y0..y1 {
        for x in x0..x1 {
            let mut lowest = BACKGROUND;
            for iy in -r..=r {
                for ix in -r..=r {
                    if ix * ix + iy * iy >= r * r {
                        continue;
                    }
                    let nx = x as i32 + ix;
                    let ny = y as i32 + iy;
                    if nx < 0 || nx >= width || ny < 0 || ny >= height {
                        continue;
                    }
                    lowest = lowest.min(grid.get_pixel(nx as u32, ny as u32)[0]);
                }
            }
            out.put_pixel(x, y, image::Luma([lowest]));
        }
    }
    out
}
