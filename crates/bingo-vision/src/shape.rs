use crate::error::VisionError;
use crate::geometry::{BoundingBox, Point, NEIGHBORS_4};
use crate::BACKGROUND;
use image::GrayImage;

/// Scores how circular the non-background content of `region` is.
///
/// The score is the ratio of the minimum to the maximum squared distance
/// from the content's centroid to its edge pixels, so it lands in `[0, 1]`
/// with a perfect circle near 1. An edge pixel is any content pixel with an
/// in-bounds 4-neighbor of a different value; content flush against the
/// image border contributes no edge there.
///
/// Fails with [`VisionError::EmptyMask`] when the region holds no content
/// and [`VisionError::DegenerateRegion`] when no edge distance is measurable
/// (a lone pixel, or content identical out to every border).
pub fn roundness(grid: &GrayImage, region: BoundingBox) -> Result<f64, VisionError> {
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    let mut sum_x: u64 = 0;
    let mut sum_y: u64 = 0;
    let mut count: u64 = 0;
    let mut edges: Vec<Point> = Vec::new();

    for y in region.min.y..=region.max.y {
        for x in region.min.x..=region.max.x {
            let Some(pixel) = grid.get_pixel_checked(x, y) else {
                continue;
            };
            let value = pixel[0];
            if value == BACKGROUND {
                continue;
            }
            sum_x += x as u64;
            sum_y += y as u64;
            count += 1;

            let is_edge = NEIGHBORS_4.iter().any(|&(dx, dy)| {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                nx >= 0
                    && nx < width
                    && ny >= 0
                    && ny < height
                    && grid.get_pixel(nx as u32, ny as u32)[0] != value
            });
            if is_edge {
                edges.push(Point::new(x, y));
            }
        }
    }

    if count == 0 {
        return Err(VisionError::EmptyMask);
    }
    let centroid_x = sum_x as f64 / count as f64;
    let centroid_y = sum_y as f64 / count as f64;

    let mut nearest = f64::INFINITY;
    let mut farthest = 0.0_f64;
    for edge in &edges {
        let dx = edge.x as f64 - centroid_x;
        let dy = edge.y as f64 - centroid_y;
        let squared = dx * dx + dy * dy;
        nearest = nearest.min(squared);
        farthest = farthest.max(squared);
    }

    if edges.is_empty() || farthest == 0.0 {
        return Err(VisionError::DegenerateRegion { bounds: region });
    }
    Ok(nearest / farthest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, image::Luma([BACKGROUND]))
    }

    fn draw_disk(grid: &mut GrayImage, cx: i32, cy: i32, radius: i32, value: u8) {
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy <= radius * radius {
                    grid.put_pixel(x as u32, y as u32, image::Luma([value]));
                }
            }
        }
    }

    fn draw_square(grid: &mut GrayImage, x0: u32, y0: u32, side: u32, value: u8) {
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                grid.put_pixel(x, y, image::Luma([value]));
            }
        }
    }

    #[test]
    fn test_large_disk_scores_high() {
        let mut grid = canvas(45, 45);
        draw_disk(&mut grid, 22, 22, 20, 100);

        let score = roundness(&grid, BoundingBox::new(Point::new(0, 0), Point::new(44, 44)))
            .expect("disk has edges");
        assert!(score >= 0.9, "disk of radius 20 scored {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn test_square_scores_half() {
        let mut grid = canvas(15, 15);
        draw_square(&mut grid, 2, 2, 11, 100);

        let score = roundness(&grid, BoundingBox::new(Point::new(0, 0), Point::new(14, 14)))
            .expect("square has edges");
        // Corner distance is twice the side-midpoint distance (squared).
        assert!((score - 0.5).abs() < 1e-9, "11x11 square scored {score}");
    }

    #[test]
    fn test_disk_beats_square_at_small_sizes() {
        let mut disk_grid = canvas(17, 17);
        draw_disk(&mut disk_grid, 8, 8, 6, 100);
        let disk = roundness(&disk_grid, BoundingBox::new(Point::new(0, 0), Point::new(16, 16)))
            .expect("disk has edges");

        let mut square_grid = canvas(17, 17);
        draw_square(&mut square_grid, 2, 2, 13, 100);
        let square = roundness(&square_grid, BoundingBox::new(Point::new(0, 0), Point::new(16, 16)))
            .expect("square has edges");

        assert!(disk > square, "disk {disk} should outscore square {square}");
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        // An L-shaped blob, far from circular.
        let mut grid = canvas(20, 20);
        draw_square(&mut grid, 2, 2, 4, 100);
        draw_square(&mut grid, 2, 6, 12, 100);

        let score = roundness(&grid, BoundingBox::new(Point::new(0, 0), Point::new(19, 19)))
            .expect("blob has edges");
        assert!((0.0..=1.0).contains(&score), "score {score} out of range");
    }

    #[test]
    fn test_empty_region_is_an_error() {
        let grid = canvas(10, 10);
        let region = BoundingBox::new(Point::new(2, 2), Point::new(7, 7));
        assert_eq!(roundness(&grid, region), Err(VisionError::EmptyMask));
    }

    #[test]
    fn test_lone_pixel_is_degenerate() {
        let mut grid = canvas(9, 9);
        grid.put_pixel(4, 4, image::Luma([50]));
        let region = BoundingBox::new(Point::new(4, 4), Point::new(4, 4));
        assert_eq!(
            roundness(&grid, region),
            Err(VisionError::DegenerateRegion { bounds: region })
        );
    }

    #[test]
    fn test_content_filling_the_whole_grid_is_degenerate() {
        let grid = GrayImage::from_pixel(6, 6, image::Luma([70]));
        let region = BoundingBox::new(Point::new(0, 0), Point::new(5, 5));
        assert_eq!(
            roundness(&grid, region),
            Err(VisionError::DegenerateRegion { bounds: region })
        );
    }

    #[test]
    fn test_region_partly_outside_grid_is_clipped() {
        let mut grid = canvas(20, 20);
        draw_disk(&mut grid, 10, 10, 6, 100);
        let clipped = roundness(&grid, BoundingBox::new(Point::new(0, 0), Point::new(40, 40)))
            .expect("in-bounds content is still scored");
        let exact = roundness(&grid, BoundingBox::new(Point::new(0, 0), Point::new(19, 19)))
            .expect("disk has edges");
        assert_eq!(clipped, exact);
    }
}
