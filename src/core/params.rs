use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ChromaSubsampling, OversizePolicy, StrideStrategy};

/// Largest dimension a baseline JPEG can carry.
pub const JPEG_MAX_DIMENSION: usize = u16::MAX as usize;

/// Conversion parameters suitable for config files and CLI overrides.
/// Missing fields in a config file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    /// Watermark band width as a fraction of the image width
    pub watermark_width_ratio: f64,
    /// Watermark band height as a fraction of the image height
    pub watermark_height_ratio: f64,
    pub watermark_blur_sigma: f32,
    pub target_width: usize,
    pub target_height: usize,
    /// Width of the edge strip feeding the bleed padding, in percent of the normalized width
    pub edge_percent: u32,
    pub edge_blur_sigma: f32,
    /// Allowed background deviation, in percent of the 0-255 channel range
    pub trim_fuzz_percent: f64,
    /// Side of the top-left block averaged into the reference background colour
    pub trim_reference_block: usize,
    pub trim_stride: StrideStrategy,
    pub oversize: OversizePolicy,
    /// JPEG quality, 1-100
    pub quality: u8,
    pub subsampling: ChromaSubsampling,
    /// Token removed from input stems when naming outputs
    pub output_marker: String,
    pub output_suffix: String,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            watermark_width_ratio: 0.23,
            watermark_height_ratio: 0.04,
            watermark_blur_sigma: 20.0,
            target_width: 3840,
            target_height: 2160,
            edge_percent: 1,
            edge_blur_sigma: 50.0,
            trim_fuzz_percent: 5.0,
            trim_reference_block: 10,
            trim_stride: StrideStrategy::Fixed(10),
            oversize: OversizePolicy::CenterCrop,
            quality: 98,
            subsampling: ChromaSubsampling::Half,
            output_marker: "-10000px".to_string(),
            output_suffix: "-4k".to_string(),
        }
    }
}

impl ConversionParams {
    /// Load parameters from a JSON file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::PathNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Fuzz threshold on the 0-255 scale (5% -> 12.75).
    pub fn fuzz_threshold(&self) -> f64 {
        self.trim_fuzz_percent / 100.0 * 255.0
    }

    pub fn validate(&self) -> Result<()> {
        let ratio_ok = |r: f64| r.is_finite() && r > 0.0 && r <= 1.0;
        if !ratio_ok(self.watermark_width_ratio) {
            return Err(Error::invalid("watermark_width_ratio", self.watermark_width_ratio));
        }
        if !ratio_ok(self.watermark_height_ratio) {
            return Err(Error::invalid("watermark_height_ratio", self.watermark_height_ratio));
        }
        if !(self.watermark_blur_sigma.is_finite() && self.watermark_blur_sigma > 0.0) {
            return Err(Error::invalid("watermark_blur_sigma", self.watermark_blur_sigma));
        }
        if !(self.edge_blur_sigma.is_finite() && self.edge_blur_sigma > 0.0) {
            return Err(Error::invalid("edge_blur_sigma", self.edge_blur_sigma));
        }
        if self.target_width == 0 || self.target_width > JPEG_MAX_DIMENSION {
            return Err(Error::invalid("target_width", self.target_width));
        }
        if self.target_height == 0 || self.target_height > JPEG_MAX_DIMENSION {
            return Err(Error::invalid("target_height", self.target_height));
        }
        if !(1..=100).contains(&self.edge_percent) {
            return Err(Error::invalid("edge_percent", self.edge_percent));
        }
        if !(self.trim_fuzz_percent.is_finite() && (0.0..=100.0).contains(&self.trim_fuzz_percent))
        {
            return Err(Error::invalid("trim_fuzz_percent", self.trim_fuzz_percent));
        }
        if self.trim_reference_block == 0 {
            return Err(Error::invalid("trim_reference_block", self.trim_reference_block));
        }
        if self.trim_stride == StrideStrategy::Fixed(0) {
            return Err(Error::invalid("trim_stride", self.trim_stride));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(Error::invalid("quality", self.quality));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_4k_preset() {
        let p = ConversionParams::default();
        assert_eq!(p.target_width, 3840);
        assert_eq!(p.target_height, 2160);
        assert_eq!(p.quality, 98);
        assert!((p.fuzz_threshold() - 12.75).abs() < 1e-9);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p = ConversionParams::from_json_str(
            r#"{ "target_width": 64, "target_height": 36, "trim_stride": "adaptive" }"#,
        )
        .unwrap();
        assert_eq!(p.target_width, 64);
        assert_eq!(p.target_height, 36);
        assert_eq!(p.trim_stride, StrideStrategy::Adaptive);
        assert_eq!(p.watermark_width_ratio, 0.23);
        assert_eq!(p.output_suffix, "-4k");
    }

    #[test]
    fn fixed_stride_and_policies_parse() {
        let p = ConversionParams::from_json_str(
            r#"{ "trim_stride": { "fixed": 4 }, "oversize": "pass-through", "subsampling": "4:2:0" }"#,
        )
        .unwrap();
        assert_eq!(p.trim_stride, StrideStrategy::Fixed(4));
        assert_eq!(p.oversize, OversizePolicy::PassThrough);
        assert_eq!(p.subsampling, ChromaSubsampling::Quarter);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            ConversionParams::from_json_str("{ not json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let bad = [
            ConversionParams { quality: 0, ..Default::default() },
            ConversionParams { target_width: 0, ..Default::default() },
            ConversionParams { target_height: 70000, ..Default::default() },
            ConversionParams { watermark_width_ratio: 1.5, ..Default::default() },
            ConversionParams { edge_percent: 0, ..Default::default() },
            ConversionParams { edge_blur_sigma: 0.0, ..Default::default() },
            ConversionParams { trim_stride: StrideStrategy::Fixed(0), ..Default::default() },
        ];
        for p in bad {
            assert!(matches!(p.validate(), Err(Error::InvalidArgument { .. })), "{:?}", p);
        }
    }
}
