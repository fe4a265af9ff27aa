//! Background padding detection and removal.
//!
//! A reference colour is averaged from the top-left corner block, then each row
//! is scored by its mean deviation from that colour over a strided sample of
//! columns. Rows scoring at or below the fuzz threshold count as background.
//! Only the top and bottom are trimmed; columns are never removed.
use tracing::{debug, info};

use crate::core::buffer::ImageBuffer;
use crate::core::params::ConversionParams;
use crate::error::Result;
use crate::types::{Color, Rect, StrideStrategy};

/// Vertical content bounds: rows `top..bottom` hold the content.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TrimBounds {
    pub top: usize,
    pub bottom: usize,
}

impl TrimBounds {
    pub fn is_full(&self, height: usize) -> bool {
        self.top == 0 && self.bottom == height
    }

    pub fn height(&self) -> usize {
        self.bottom.saturating_sub(self.top)
    }
}

/// Mean colour of the top-left `block`x`block` pixels, clamped to the image.
pub fn reference_color(image: &ImageBuffer, block: usize) -> Color {
    let rows = block.min(image.height());
    let cols = block.min(image.width());
    let count = rows * cols;
    if count == 0 {
        return Color::default();
    }

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for y in 0..rows {
        for x in 0..cols {
            let p = image.pixel(x, y);
            r += p[0] as u64;
            g += p[1] as u64;
            b += p[2] as u64;
        }
    }

    let n = count as f64;
    Color::new(r as f64 / n, g as f64 / n, b as f64 / n)
}

/// Mean per-pixel deviation of row `y` from `reference`, sampling columns 0, stride, 2*stride, ...
pub fn row_deviation(image: &ImageBuffer, y: usize, reference: &Color, stride: usize) -> f64 {
    let mut total = 0.0;
    let mut samples = 0usize;
    for x in (0..image.width()).step_by(stride.max(1)) {
        total += reference.deviation(image.pixel(x, y));
        samples += 1;
    }
    if samples == 0 {
        0.0
    } else {
        total / samples as f64
    }
}

pub fn detect_background_bounds(
    image: &ImageBuffer,
    reference: &Color,
    threshold: f64,
    stride: StrideStrategy,
) -> TrimBounds {
    let height = image.height();
    let step = stride.stride_for(image.width());
    let is_content = |y: usize| row_deviation(image, y, reference, step) > threshold;

    let top = (0..height).find(|&y| is_content(y)).unwrap_or(0);
    let bottom = (0..height)
        .rev()
        .find(|&y| is_content(y))
        .map(|y| y + 1)
        .unwrap_or(height);

    debug!(
        "Trim scan: reference=({:.2}, {:.2}, {:.2}), threshold={:.2}, stride={}",
        reference.r, reference.g, reference.b, threshold, step
    );

    TrimBounds { top, bottom }
}

/// Remove uniform top/bottom padding. The input is returned as-is when nothing is trimmed.
pub fn trim_background(image: ImageBuffer, params: &ConversionParams) -> Result<ImageBuffer> {
    if image.is_empty() {
        return Ok(image);
    }

    let reference = reference_color(&image, params.trim_reference_block);
    let bounds = detect_background_bounds(
        &image,
        &reference,
        params.fuzz_threshold(),
        params.trim_stride,
    );

    info!(
        "Background trim: top {}px, bottom {}px",
        bounds.top,
        image.height() - bounds.bottom
    );

    if bounds.is_full(image.height()) {
        return Ok(image);
    }

    image.crop(Rect::new(0, bounds.top, image.width(), bounds.height()))
}
