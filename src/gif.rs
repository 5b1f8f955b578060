use anyhow::{Context, Result};
use bingo_vision::StageObserver;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, GrayImage, RgbImage, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

const FRAME_MILLIS: u32 = 1000;

/// Collects every pipeline stage and writes them as a looping GIF, one
/// second per frame. Handy for eyeballing where a bad capture falls apart.
#[derive(Default)]
pub struct GifObserver {
    frames: Vec<RgbaImage>,
}

impl GifObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame that did not come from the pipeline, e.g. the
    /// grayscale conversion before any stage ran.
    pub fn snapshot(&mut self, frame: &GrayImage) {
        self.frames.push(expand_gray(frame));
    }

    /// Records the untouched color input, the traditional opening frame.
    pub fn snapshot_color(&mut self, frame: &RgbImage) {
        self.frames.push(expand_rgb(frame));
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .context("Failed to set GIF repeat")?;
        for rgba in &self.frames {
            let delay = Delay::from_numer_denom_ms(FRAME_MILLIS, 1);
            let frame = Frame::from_parts(rgba.clone(), 0, 0, delay);
            encoder.encode_frame(frame).context("Failed to encode GIF frame")?;
        }
        Ok(())
    }
}

impl StageObserver for GifObserver {
    fn stage(&mut self, name: &str, frame: &GrayImage) {
        debug!("Recording stage '{}'", name);
        self.snapshot(frame);
    }
}

fn expand_gray(gray: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        image::Rgba([v, v, v, 255])
    })
}

fn expand_rgb(rgb: &RgbImage) -> RgbaImage {
    RgbaImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let p = rgb.get_pixel(x, y);
        image::Rgba([p[0], p[1], p[2], 255])
    })
}
