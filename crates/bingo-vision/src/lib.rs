//! Pixel-level extraction of per-player state from board-game screenshots.
//!
//! The pipeline works on plain intensity grids: reserve 255 as a background
//! sentinel, flood the backdrop with it, erode stray noise away, box the
//! surviving player panels, then dig the circular profile icon out of each
//! panel and read its average color. No ML, no OCR, just flood fills and
//! morphology.

pub mod color;
pub mod config;
pub mod error;
pub mod flood;
pub mod geometry;
pub mod intensity;
pub mod matcher;
pub mod morphology;
pub mod observe;
pub mod panel;
pub mod pipeline;
pub mod regions;
pub mod shape;
pub mod win;

pub use color::color_stats;
pub use config::VisionConfig;
pub use error::VisionError;
pub use flood::{flood_fill, FillPolicy};
pub use geometry::{BoundingBox, PixelMask, Point};
pub use matcher::{PlayerMatch, PlayerMatcher};
pub use observe::{NullObserver, StageObserver};
pub use panel::{isolate_icon, reference_sample, IconRegion};
pub use pipeline::{Analyzer, IconReport, PanelReport, ScreenshotReport};

/// Intensity value reserved for confirmed background. Input frames are
/// shifted away from 255 first so the sentinel can never collide with real
/// pixel data.
pub const BACKGROUND: u8 = 255;

/// Upper bound on simultaneously visible player panels. Region ids are
/// stamped below this value, so any pixel above it is still unlabeled
/// foreground. Fixed by the label encoding, not a tunable.
pub const MAX_PANELS: u8 = 15;
