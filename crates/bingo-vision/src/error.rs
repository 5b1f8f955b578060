use crate::geometry::BoundingBox;
use thiserror::Error;

/// Failures raised by individual pipeline stages.
///
/// These are panel-local: the analyzer logs the error, skips the panel and
/// keeps going, so one unreadable panel never sinks a whole screenshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisionError {
    /// The grayscale and color views of a screenshot disagree on size.
    #[error("grayscale grid is {gray_w}x{gray_h} but color grid is {rgb_w}x{rgb_h}")]
    DimensionMismatch {
        gray_w: u32,
        gray_h: u32,
        rgb_w: u32,
        rgb_h: u32,
    },

    /// A color average was requested over zero usable pixels.
    #[error("pixel mask is empty")]
    EmptyMask,

    /// Labeling found nothing worth analyzing inside the given bounds.
    #[error("no usable regions within {bounds}")]
    NoRegions { bounds: BoundingBox },

    /// A region has no measurable edge, e.g. a lone pixel, so roundness is
    /// undefined for it.
    #[error("degenerate region at {bounds}")]
    DegenerateRegion { bounds: BoundingBox },
}
