//! Shared types and enums used across widen.
//! Includes geometry (`Rect`), the reference `Color`, input format detection
//! (`InputFormat`), and the policy enums carried by `ConversionParams`.
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in buffer coordinates.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when the rectangle lies entirely inside a `width`x`height` buffer.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x
            .checked_add(self.width)
            .is_some_and(|right| right <= width)
            && self
                .y
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= height)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Floating point RGB triple, used for averaged colours such as the trim reference.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Mean of the three per-channel absolute differences to `pixel`.
    #[inline]
    pub fn deviation(&self, pixel: [u8; 3]) -> f64 {
        let dr = (pixel[0] as f64 - self.r).abs();
        let dg = (pixel[1] as f64 - self.g).abs();
        let db = (pixel[2] as f64 - self.b).abs();
        (dr + dg + db) / 3.0
    }
}

impl From<[u8; 3]> for Color {
    fn from(p: [u8; 3]) -> Self {
        Color::new(p[0] as f64, p[1] as f64, p[2] as f64)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum InputFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
}

impl InputFormat {
    /// Classify by extension, case-insensitively. `None` for anything unsupported.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(InputFormat::Jpeg),
            "png" => Some(InputFormat::Png),
            "bmp" => Some(InputFormat::Bmp),
            "tif" | "tiff" => Some(InputFormat::Tiff),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Jpeg => write!(f, "JPEG"),
            InputFormat::Png => write!(f, "PNG"),
            InputFormat::Bmp => write!(f, "BMP"),
            InputFormat::Tiff => write!(f, "TIFF"),
        }
    }
}

/// Column sampling used when scoring rows for background trimming.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrideStrategy {
    /// Sample every n-th column, starting at column 0.
    Fixed(usize),
    /// Pick the stride from the image width.
    Adaptive,
}

impl StrideStrategy {
    pub fn stride_for(&self, width: usize) -> usize {
        match *self {
            StrideStrategy::Fixed(n) => n.max(1),
            StrideStrategy::Adaptive => match width {
                0..640 => 1,
                640..2048 => 5,
                2048..8192 => 10,
                _ => 20,
            },
        }
    }
}

impl Default for StrideStrategy {
    fn default() -> Self {
        StrideStrategy::Fixed(10)
    }
}

impl std::fmt::Display for StrideStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrideStrategy::Fixed(n) => write!(f, "Fixed({})", n),
            StrideStrategy::Adaptive => write!(f, "Adaptive"),
        }
    }
}

/// What the canvas extender does with an image already at least as wide as the target.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OversizePolicy {
    /// Keep the central `target_width` columns.
    #[default]
    CenterCrop,
    /// Return the normalized image unextended.
    PassThrough,
}

impl std::fmt::Display for OversizePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OversizePolicy::CenterCrop => write!(f, "CenterCrop"),
            OversizePolicy::PassThrough => write!(f, "PassThrough"),
        }
    }
}

/// JPEG chroma subsampling.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum ChromaSubsampling {
    #[serde(rename = "4:4:4")]
    Full,
    #[default]
    #[serde(rename = "4:2:2")]
    Half,
    #[serde(rename = "4:2:0")]
    Quarter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_containment() {
        let r = Rect::new(2, 3, 4, 5);
        assert!(r.fits_within(6, 8));
        assert!(!r.fits_within(5, 8));
        assert!(!r.fits_within(6, 7));
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 7));
        assert!(!r.contains(6, 7));
        assert!(Rect::new(0, 0, 0, 3).is_empty());
    }

    #[test]
    fn extensions_are_case_insensitive() {
        assert_eq!(InputFormat::from_path(Path::new("a/B.JPG")), Some(InputFormat::Jpeg));
        assert_eq!(InputFormat::from_path(Path::new("x.Tif")), Some(InputFormat::Tiff));
        assert_eq!(InputFormat::from_path(Path::new("x.jpeg")), Some(InputFormat::Jpeg));
        assert_eq!(InputFormat::from_path(Path::new("x.gif")), None);
        assert_eq!(InputFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn adaptive_stride_table() {
        let s = StrideStrategy::Adaptive;
        assert_eq!(s.stride_for(100), 1);
        assert_eq!(s.stride_for(1920), 5);
        assert_eq!(s.stride_for(3840), 10);
        assert_eq!(s.stride_for(10000), 20);
        assert_eq!(StrideStrategy::Fixed(0).stride_for(100), 1);
    }

    #[test]
    fn color_deviation_averages_channels() {
        let c = Color::new(10.0, 20.0, 30.0);
        assert_eq!(c.deviation([10, 20, 30]), 0.0);
        assert_eq!(c.deviation([13, 14, 30]), 3.0);
    }
}
