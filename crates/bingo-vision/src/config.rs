use crate::geometry::Point;

/// Tunables for every pipeline stage, passed explicitly so no stage reaches
/// for hidden globals. The defaults are calibrated against the board-game
/// client this tool was built for: panels on a near-uniform backdrop, a
/// strip of progress tiles per panel and a circular profile icon.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Seed for the screen-wide background fill, normally a corner.
    pub background_seed: Point,
    /// Expected backdrop intensity at the seed; the adaptive fill recenters
    /// on the real value when the capture is brighter or darker.
    pub background_expected: u8,
    /// Half-width of the open fill band around the expected value.
    pub background_tolerance: u8,
    /// Disk radius of the screen-wide denoising erosion.
    pub screen_erode_radius: u32,
    /// Regions whose corner-to-corner span product is below this are noise.
    pub min_region_area: u32,
    /// Seed offset (left, up) from a panel's bottom-right corner for the
    /// panel-background fill; it must land on plain panel body.
    pub panel_seed_inset: (u32, u32),
    /// Expected panel-body intensity at the inset seed.
    pub panel_expected: u8,
    /// Band half-width for the panel-background fill.
    pub panel_tolerance: u8,
    /// Disk radius of the per-panel erosion that wipes the progress tiles.
    pub panel_erode_radius: u32,
    /// Disk radius of the closing pass that fuses the icon back together.
    pub panel_close_radius: u32,
    /// Value every surviving pixel is flattened to before icon candidates
    /// are labeled, giving roundness a clean two-level image.
    pub mask_flatten_value: u8,
    /// Intensity of a winning progress tile, as read off the shifted grid.
    pub win_color: u8,
    /// A horizontal tile run must be strictly longer than this to qualify.
    pub win_run_length: u32,
    /// Qualifying runs needed in a single row to call the panel won.
    pub win_run_count: u32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            background_seed: Point::new(0, 0),
            background_expected: 20,
            background_tolerance: 1,
            screen_erode_radius: 3,
            min_region_area: 30,
            panel_seed_inset: (20, 2),
            panel_expected: 30,
            panel_tolerance: 1,
            panel_erode_radius: 3,
            panel_close_radius: 5,
            mask_flatten_value: 100,
            win_color: 115,
            win_run_length: 5,
            win_run_count: 5,
        }
    }
}
