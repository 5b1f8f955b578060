use crate::geometry::BoundingBox;
use image::GrayImage;
use tracing::debug;

/// Decides whether a panel shows the winning tile pattern: some single row
/// inside `region` containing at least `required_runs` horizontal runs of
/// `win_color`, each strictly longer than `min_run` pixels.
///
/// Rows are scanned bottom to top since the tile strip usually sits low in
/// the panel, and the first qualifying row wins. A run still in progress at
/// the region's right edge counts like any other.
pub fn check_win(
    grid: &GrayImage,
    region: BoundingBox,
    win_color: u8,
    min_run: u32,
    required_runs: u32,
) -> bool {
    for y in (region.min.y..=region.max.y).rev() {
        let mut runs = 0u32;
        let mut length = 0u32;
        for x in region.min.x..=region.max.x {
            let hit = grid
                .get_pixel_checked(x, y)
                .is_some_and(|p| p[0] == win_color);
            if hit {
                length += 1;
            } else {
                if length > min_run {
                    runs += 1;
                }
                length = 0;
            }
        }
        if length > min_run {
            runs += 1;
        }
        if runs >= required_runs {
            debug!("Winning row at y={} with {} run(s)", y, runs);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    const WIN: u8 = 115;

    fn panel(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, image::Luma([80]))
    }

    fn run(grid: &mut GrayImage, y: u32, x0: u32, len: u32) {
        for x in x0..x0 + len {
            grid.put_pixel(x, y, image::Luma([WIN]));
        }
    }

    fn full(grid: &GrayImage) -> BoundingBox {
        BoundingBox::new(Point::new(0, 0), Point::new(grid.width() - 1, grid.height() - 1))
    }

    #[test]
    fn test_five_long_runs_in_one_row_win() {
        let mut grid = panel(66, 10);
        for i in 0..5 {
            run(&mut grid, 6, i * 13, 6);
        }
        assert!(check_win(&grid, full(&grid), WIN, 5, 5));
    }

    #[test]
    fn test_single_run_is_not_enough() {
        let mut grid = panel(50, 10);
        run(&mut grid, 6, 2, 40);
        assert!(!check_win(&grid, full(&grid), WIN, 5, 5));
    }

    #[test]
    fn test_lone_qualifying_run_satisfies_a_count_of_one() {
        // 20-pixel row, positions 0 through 5 hold the win color.
        let mut grid = panel(20, 1);
        run(&mut grid, 0, 0, 6);
        assert!(check_win(&grid, full(&grid), WIN, 5, 1));
        assert!(!check_win(&grid, full(&grid), WIN, 5, 2));
    }

    #[test]
    fn test_runs_at_the_length_bound_do_not_count() {
        let mut grid = panel(50, 10);
        for i in 0..5 {
            run(&mut grid, 6, i * 8, 5); // exactly min_run, strictly-longer fails
        }
        assert!(!check_win(&grid, full(&grid), WIN, 5, 5));

        let mut grid = panel(50, 10);
        for i in 0..5 {
            run(&mut grid, 6, i * 8, 6);
        }
        assert!(check_win(&grid, full(&grid), WIN, 5, 5));
    }

    #[test]
    fn test_run_touching_the_right_edge_counts() {
        let mut grid = panel(38, 8);
        run(&mut grid, 4, 0, 6);
        run(&mut grid, 4, 8, 6);
        run(&mut grid, 4, 16, 6);
        run(&mut grid, 4, 24, 6);
        run(&mut grid, 4, 32, 6); // ends exactly at the region edge
        assert!(check_win(&grid, full(&grid), WIN, 5, 5));
    }

    #[test]
    fn test_runs_spread_over_rows_do_not_win() {
        let mut grid = panel(50, 10);
        for i in 0..5 {
            run(&mut grid, i + 2, 10, 6); // one run per row
        }
        assert!(!check_win(&grid, full(&grid), WIN, 5, 5));
    }

    #[test]
    fn test_wrong_color_never_wins() {
        let mut grid = panel(50, 10);
        for i in 0..5 {
            run(&mut grid, 6, i * 8, 6);
        }
        assert!(!check_win(&grid, full(&grid), 90, 5, 5));
    }

    #[test]
    fn test_region_clipped_to_grid() {
        let mut grid = panel(40, 6);
        run(&mut grid, 3, 0, 40);
        let oversized = BoundingBox::new(Point::new(0, 0), Point::new(99, 99));
        assert!(check_win(&grid, oversized, WIN, 5, 1), "out-of-grid pixels read as misses");
    }
}
