use crate::color::color_stats;
use crate::config::VisionConfig;
use crate::error::VisionError;
use crate::flood::{flood_fill, FillPolicy};
use crate::geometry::{BoundingBox, PixelMask, Point};
use crate::intensity::shift;
use crate::morphology::{close, erode};
use crate::observe::{NullObserver, StageObserver};
use crate::regions::label_regions;
use crate::shape::roundness;
use crate::BACKGROUND;
use bingo_data::ColorSample;
use image::{GrayImage, RgbImage};
use tracing::{debug, warn};

/// The profile icon isolated from one panel.
#[derive(Debug, Clone)]
pub struct IconRegion {
    pub bounds: BoundingBox,
    /// Non-background pixels inside `bounds`, row-major.
    pub pixels: PixelMask,
    pub roundness: f64,
}

/// Strips a panel down to its profile icon.
///
/// The panel body is flooded with the background sentinel from a seed just
/// inside the bottom-right corner, erosion then wipes the progress tiles
/// and other thin leftovers, closing fuses whatever erosion nibbled apart,
/// and everything that survived is flattened to one value and labeled. The
/// candidate with the highest roundness is the icon; ties keep the first
/// one found. Candidates whose roundness is undefined are logged and
/// skipped.
///
/// `grid` is the prepared full-screen grid. The fill can in principle leak
/// past `bounds` through connected same-colored pixels; the morphology and
/// labeling stay inside the panel window.
pub fn isolate_icon(
    grid: &GrayImage,
    bounds: BoundingBox,
    config: &VisionConfig,
    observer: &mut dyn StageObserver,
) -> Result<IconRegion, VisionError> {
    let seed = Point::new(
        bounds.max.x.saturating_sub(config.panel_seed_inset.0),
        bounds.max.y.saturating_sub(config.panel_seed_inset.1),
    );
    let (filled, _) = flood_fill(
        grid,
        seed,
        config.panel_expected,
        BACKGROUND,
        config.panel_tolerance,
        FillPolicy::Adaptive,
    );
    observer.stage("panel-filled", &filled);

    let window = Some((bounds.min, bounds.max));
    let eroded = erode(&filled, config.panel_erode_radius, window);
    observer.stage("panel-eroded", &eroded);

    let closed = close(&eroded, config.panel_close_radius, window);
    observer.stage("panel-closed", &closed);

    let mut flattened = closed;
    for pixel in flattened.pixels_mut() {
        if pixel[0] != BACKGROUND {
            pixel[0] = config.mask_flatten_value;
        }
    }
    observer.stage("panel-flattened", &flattened);

    let candidates = label_regions(&flattened, window, BACKGROUND, config.min_region_area);
    if candidates.is_empty() {
        return Err(VisionError::NoRegions { bounds });
    }
    debug!("{} icon candidate(s) inside the panel", candidates.len());

    let mut best: Option<(f64, BoundingBox)> = None;
    for candidate in candidates {
        match roundness(&flattened, candidate) {
            Ok(score) => {
                if best.map_or(true, |(top, _)| score > top) {
                    best = Some((score, candidate));
                }
            }
            Err(err) => warn!("Skipping icon candidate: {}", err),
        }
    }
    let Some((score, icon_bounds)) = best else {
        return Err(VisionError::NoRegions { bounds });
    };

    let mut pixels = PixelMask::new();
    for y in icon_bounds.min.y..=icon_bounds.max.y {
        for x in icon_bounds.min.x..=icon_bounds.max.x {
            let masked = flattened
                .get_pixel_checked(x, y)
                .map_or(false, |p| p[0] != BACKGROUND);
            if masked {
                pixels.push(Point::new(x, y));
            }
        }
    }

    Ok(IconRegion {
        bounds: icon_bounds,
        pixels,
        roundness: score,
    })
}

/// Reads the icon color out of one reference profile image.
///
/// Runs the same stages as live analysis: sentinel shift, adaptive
/// background fill, panel labeling, then [`isolate_icon`] on the first
/// panel, with the color averaged from the untouched `rgb`. Roster colors
/// are only comparable to live samples because both come through this one
/// path.
pub fn reference_sample(
    gray: &GrayImage,
    rgb: &RgbImage,
    config: &VisionConfig,
) -> Result<ColorSample, VisionError> {
    if gray.dimensions() != rgb.dimensions() {
        return Err(VisionError::DimensionMismatch {
            gray_w: gray.width(),
            gray_h: gray.height(),
            rgb_w: rgb.width(),
            rgb_h: rgb.height(),
        });
    }

    let shifted = shift(gray, -1, true);
    let (filled, _) = flood_fill(
        &shifted,
        config.background_seed,
        config.background_expected,
        BACKGROUND,
        config.background_tolerance,
        FillPolicy::Adaptive,
    );

    let panels = label_regions(&filled, None, BACKGROUND, config.min_region_area);
    let Some(&first) = panels.first() else {
        return Err(VisionError::NoRegions {
            bounds: BoundingBox::new(
                Point::new(0, 0),
                Point::new(gray.width().saturating_sub(1), gray.height().saturating_sub(1)),
            ),
        });
    };
    if panels.len() > 1 {
        debug!("Reference image has {} regions, using the first", panels.len());
    }

    let icon = isolate_icon(&filled, first, config, &mut NullObserver)?;
    color_stats(rgb, &icon.pixels)
}
