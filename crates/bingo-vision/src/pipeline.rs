use crate::color::color_stats;
use crate::config::VisionConfig;
use crate::error::VisionError;
use crate::flood::{flood_fill, FillPolicy};
use crate::geometry::BoundingBox;
use crate::intensity::shift;
use crate::matcher::{PlayerMatch, PlayerMatcher};
use crate::morphology::erode;
use crate::observe::{NullObserver, StageObserver};
use crate::panel::isolate_icon;
use crate::regions::label_regions;
use crate::win::check_win;
use crate::BACKGROUND;
use bingo_data::ColorSample;
use image::{GrayImage, RgbImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// The isolated icon of one panel together with its classification inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconReport {
    pub bounds: BoundingBox,
    pub roundness: f64,
    pub color: ColorSample,
}

/// Everything extracted from one player's panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelReport {
    /// Position in discovery order, stable across runs.
    pub index: usize,
    pub bounds: BoundingBox,
    /// Whether the panel shows the winning tile pattern.
    pub is_win: bool,
    pub icon: IconReport,
    /// Closest roster entry, when a roster was supplied.
    pub player: Option<PlayerMatch>,
}

/// Result of analyzing one full screenshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenshotReport {
    pub panels: Vec<PanelReport>,
    /// Panels dropped by stage-local failures; details go to the log.
    pub skipped: usize,
}

/// Whole-screenshot analyzer.
///
/// `analyze` runs the shared front half (sentinel shift, background fill,
/// denoising erosion, panel labeling) once, then fans the independent
/// panels out across threads. `analyze_with_observer` is the sequential
/// variant that reports every intermediate grid, for debug dumps where
/// frame order matters more than speed.
pub struct Analyzer {
    config: VisionConfig,
}

impl Analyzer {
    pub fn new(config: VisionConfig) -> Self {
        Self { config }
    }

    /// Analyzes a screenshot, processing panels in parallel.
    ///
    /// `gray` and `rgb` must be views of the same capture. Panel order in
    /// the report matches discovery order regardless of scheduling.
    pub fn analyze(
        &self,
        gray: &GrayImage,
        rgb: &RgbImage,
        matcher: Option<&PlayerMatcher>,
    ) -> Result<ScreenshotReport, VisionError> {
        let (prepared, panels) = self.prepare(gray, rgb, &mut NullObserver)?;
        let results: Vec<Result<PanelReport, VisionError>> = panels
            .par_iter()
            .enumerate()
            .map(|(index, &bounds)| {
                self.analyze_panel(&prepared, rgb, index, bounds, matcher, &mut NullObserver)
            })
            .collect();
        Ok(Self::collect_report(results))
    }

    /// Same pipeline as [`Analyzer::analyze`], sequential, pushing every
    /// intermediate grid to `observer`.
    pub fn analyze_with_observer(
        &self,
        gray: &GrayImage,
        rgb: &RgbImage,
        matcher: Option<&PlayerMatcher>,
        observer: &mut dyn StageObserver,
    ) -> Result<ScreenshotReport, VisionError> {
        let (prepared, panels) = self.prepare(gray, rgb, observer)?;
        let results: Vec<Result<PanelReport, VisionError>> = panels
            .iter()
            .enumerate()
            .map(|(index, &bounds)| {
                self.analyze_panel(&prepared, rgb, index, bounds, matcher, observer)
            })
            .collect();
        Ok(Self::collect_report(results))
    }

    /// Shared front half: shift the intensity range away from the sentinel,
    /// flood the backdrop, erode stray noise, box the panels.
    fn prepare(
        &self,
        gray: &GrayImage,
        rgb: &RgbImage,
        observer: &mut dyn StageObserver,
    ) -> Result<(GrayImage, Vec<BoundingBox>), VisionError> {
        if gray.dimensions() != rgb.dimensions() {
            return Err(VisionError::DimensionMismatch {
                gray_w: gray.width(),
                gray_h: gray.height(),
                rgb_w: rgb.width(),
                rgb_h: rgb.height(),
            });
        }
        let cfg = &self.config;

        let shifted = shift(gray, -1, true);
        observer.stage("shifted", &shifted);

        let (filled, backdrop) = flood_fill(
            &shifted,
            cfg.background_seed,
            cfg.background_expected,
            BACKGROUND,
            cfg.background_tolerance,
            FillPolicy::Adaptive,
        );
        debug!("Backdrop fill covered {} pixel(s)", backdrop.len());
        observer.stage("backdrop-filled", &filled);

        let denoised = erode(&filled, cfg.screen_erode_radius, None);
        observer.stage("denoised", &denoised);

        let panels = label_regions(&denoised, None, BACKGROUND, cfg.min_region_area);
        if panels.is_empty() {
            warn!("No panels found in a {}x{} screenshot", gray.width(), gray.height());
        } else {
            info!("Found {} panel(s)", panels.len());
        }
        Ok((denoised, panels))
    }

    fn analyze_panel(
        &self,
        prepared: &GrayImage,
        rgb: &RgbImage,
        index: usize,
        bounds: BoundingBox,
        matcher: Option<&PlayerMatcher>,
        observer: &mut dyn StageObserver,
    ) -> Result<PanelReport, VisionError> {
        let cfg = &self.config;
        let is_win = check_win(
            prepared,
            bounds,
            cfg.win_color,
            cfg.win_run_length,
            cfg.win_run_count,
        );
        let icon = isolate_icon(prepared, bounds, cfg, observer)?;
        let color = color_stats(rgb, &icon.pixels)?;
        let player = matcher.and_then(|m| m.match_color(&color));
        debug!(
            "Panel {} at ({}, {}): win={}, icon roundness {:.3}",
            index, bounds.min.x, bounds.min.y, is_win, icon.roundness
        );

        Ok(PanelReport {
            index,
            bounds,
            is_win,
            icon: IconReport {
                bounds: icon.bounds,
                roundness: icon.roundness,
                color,
            },
            player,
        })
    }

    fn collect_report(results: Vec<Result<PanelReport, VisionError>>) -> ScreenshotReport {
        let mut report = ScreenshotReport::default();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(panel) => report.panels.push(panel),
                Err(err) => {
                    warn!("Skipping panel {}: {}", index, err);
                    report.skipped += 1;
                }
            }
        }
        report
    }
}
