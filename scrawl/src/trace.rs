//! Tracing raster artwork into outline geometry.

use std::fmt;

use kurbo::{BezPath, Rect};

use crate::outline::{push_rect, Outline};

/// Alpha above this counts as ink on a transparent canvas.
const ALPHA_THRESHOLD: u8 = 64;
/// Mean of R/G/B below this counts as ink on an opaque canvas.
const BRIGHTNESS_THRESHOLD: u16 = 128;
/// Share of above-threshold alpha pixels at which a canvas is treated as
/// opaque, switching the ink test from alpha to brightness.
const OPAQUE_COVERAGE: f64 = 0.95;

/// A borrowed-nothing RGBA bitmap, one byte per channel, rows top to bottom.
#[derive(Clone, Debug)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// The pixel buffer does not match the stated dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSizeMismatch {
    pub width: u32,
    pub height: u32,
    pub len: usize,
}

impl fmt::Display for ImageSizeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ImageSizeMismatch { width, height, len } = self;
        let expected = *width as usize * *height as usize * 4;
        write!(
            f,
            "{len} bytes of pixel data for a {width}x{height} RGBA image (expected {expected})"
        )
    }
}

impl std::error::Error for ImageSizeMismatch {}

impl RasterImage {
    /// Wraps an RGBA8 buffer, `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageSizeMismatch> {
        if pixels.len() != width as usize * height as usize * 4 {
            return Err(ImageSizeMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(RasterImage {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// True when at least [`OPAQUE_COVERAGE`] of pixels are above the alpha
    /// threshold, i.e. the artwork is dark-on-light rather than
    /// ink-on-transparent.
    fn background_is_opaque(&self) -> bool {
        let total = self.width as usize * self.height as usize;
        let opaque = self
            .pixels
            .chunks_exact(4)
            .filter(|px| px[3] > ALPHA_THRESHOLD)
            .count();
        opaque as f64 >= OPAQUE_COVERAGE * total as f64
    }

    /// Traces the ink regions into a filled outline, one unit-thick closed
    /// rectangle per maximal horizontal run of ink pixels.
    ///
    /// Never fails: an image with no detectable ink yields a single
    /// rectangle covering the whole canvas so downstream consumers always
    /// have geometry to work with.
    pub fn trace(&self) -> Outline {
        let opaque = self.background_is_opaque();
        let is_ink = |px: [u8; 4]| {
            if opaque {
                (px[0] as u16 + px[1] as u16 + px[2] as u16) < BRIGHTNESS_THRESHOLD * 3
            } else {
                px[3] > ALPHA_THRESHOLD
            }
        };

        let mut path = BezPath::new();
        let mut found_ink = false;
        for y in 0..self.height {
            let mut x = 0;
            while x < self.width {
                if !is_ink(self.rgba(x, y)) {
                    x += 1;
                    continue;
                }
                let run_start = x;
                while x < self.width && is_ink(self.rgba(x, y)) {
                    x += 1;
                }
                push_rect(
                    &mut path,
                    Rect::new(run_start as f64, y as f64, x as f64, (y + 1) as f64),
                );
                found_ink = true;
            }
        }

        if !found_ink {
            let (width, height) = (self.width, self.height);
            log::warn!("no ink found in {width}x{height} raster, tracing the full canvas");
            return Outline::rect(Rect::new(0.0, 0.0, width as f64, height as f64));
        }
        Outline::from_path(path)
    }
}
