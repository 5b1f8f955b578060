use crate::gif::GifObserver;
use anyhow::{Context, Result};
use bingo_data::Roster;
use bingo_vision::{Analyzer, PanelReport, PlayerMatcher, ScreenshotReport, VisionConfig};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(
    input: PathBuf,
    roster: Option<PathBuf>,
    json: bool,
    debug_gif: Option<PathBuf>,
    win_color: Option<u8>,
    erode_radius: Option<u32>,
) -> Result<()> {
    let opened =
        image::open(&input).with_context(|| format!("Failed to open {}", input.display()))?;
    let gray = opened.to_luma8();
    let rgb = opened.to_rgb8();
    info!("Loaded {} ({}x{})", input.display(), gray.width(), gray.height());

    let matcher = match roster {
        Some(path) => {
            let roster = Roster::load(&path)?;
            Some(PlayerMatcher::new(roster))
        }
        None => None,
    };

    let mut config = VisionConfig::default();
    if let Some(value) = win_color {
        config.win_color = value;
    }
    if let Some(radius) = erode_radius {
        config.screen_erode_radius = radius;
    }

    let analyzer = Analyzer::new(config);
    let report = match debug_gif {
        Some(ref path) => analyze_with_gif(&analyzer, &gray, &rgb, matcher.as_ref(), path)?,
        None => analyzer.analyze(&gray, &rgb, matcher.as_ref())?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

fn analyze_with_gif(
    analyzer: &Analyzer,
    gray: &image::GrayImage,
    rgb: &image::RgbImage,
    matcher: Option<&PlayerMatcher>,
    path: &Path,
) -> Result<ScreenshotReport> {
    let mut observer = GifObserver::new();
    observer.snapshot_color(rgb); // raw input, then its grayscale conversion
    observer.snapshot(gray);
    let report = analyzer.analyze_with_observer(gray, rgb, matcher, &mut observer)?;
    observer
        .write(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} stage frame(s) to {}", observer.frame_count(), path.display());
    Ok(report)
}

fn print_report(report: &ScreenshotReport) {
    if report.panels.is_empty() {
        println!("No panels detected.");
    }
    for panel in &report.panels {
        println!("{}", describe_panel(panel));
    }
    if report.skipped > 0 {
        println!("{} panel(s) skipped, see the log for details.", report.skipped);
    }
}

fn describe_panel(panel: &PanelReport) -> String {
    let status = if panel.is_win { "SOLVED" } else { "NOT solved" };
    match &panel.player {
        Some(player) => format!(
            "{} {} (color distance {:.1})",
            player.name, status, player.distance
        ),
        None => format!(
            "panel {} {} (icon color {:.0}, {:.0}, {:.0})",
            panel.index, status, panel.icon.color.r, panel.icon.color.g, panel.icon.color.b
        ),
    }
}
