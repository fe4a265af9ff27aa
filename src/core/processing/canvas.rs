use tracing::{debug, info, warn};

use crate::core::buffer::ImageBuffer;
use crate::core::params::ConversionParams;
use crate::core::processing::blur::gaussian_blur;
use crate::core::processing::resize::resize_rgb;
use crate::error::Result;
use crate::types::{OversizePolicy, Rect};

/// Horizontal placement of the padding strips and the image on the target canvas.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CanvasLayout {
    /// Columns taken from each side of the image to build the padding
    pub edge_width: usize,
    /// Width of each side padding
    pub pad_width: usize,
    /// Left column of the image on the canvas
    pub image_x: usize,
    /// Left column of the right padding on the canvas
    pub right_x: usize,
}

impl CanvasLayout {
    /// Layout for an image `width` columns wide; expects `width < target_width`.
    pub fn compute(width: usize, params: &ConversionParams) -> Self {
        let edge_width = (width * params.edge_percent as usize / 100).clamp(1, width.max(1));
        let pad_width = params.target_width.saturating_sub(width) / 2;
        Self {
            edge_width,
            pad_width,
            image_x: pad_width,
            right_x: pad_width + width,
        }
    }
}

/// Stretch the `strip` of `image` to one padding's size and wash it out.
fn bleed_padding(
    image: &ImageBuffer,
    strip: Rect,
    pad_width: usize,
    params: &ConversionParams,
) -> Result<ImageBuffer> {
    let edge = image.crop(strip)?;
    let stretched = resize_rgb(&edge, pad_width, params.target_height)?;
    Ok(gaussian_blur(&stretched, params.edge_blur_sigma))
}

fn handle_oversize(image: ImageBuffer, params: &ConversionParams) -> Result<ImageBuffer> {
    let width = image.width();
    match params.oversize {
        OversizePolicy::CenterCrop => {
            let x = (width - params.target_width) / 2;
            info!(
                "Image width {} >= target {}, center-cropping from x={}",
                width, params.target_width, x
            );
            image.crop(Rect::new(x, 0, params.target_width, image.height()))
        }
        OversizePolicy::PassThrough => {
            warn!(
                "Image width {} >= target {}, leaving it unextended",
                width, params.target_width
            );
            Ok(image)
        }
    }
}

/// Extend to `target_width`x`target_height` with blurred bleed padding built from
/// the image's own left and right edge strips. Uncovered columns stay black.
pub fn extend_canvas(image: ImageBuffer, params: &ConversionParams) -> Result<ImageBuffer> {
    let image = if image.height() != params.target_height {
        debug!(
            "Height {} differs from target {}, resizing before extension",
            image.height(),
            params.target_height
        );
        resize_rgb(&image, image.width(), params.target_height)?
    } else {
        image
    };

    let width = image.width();
    if width >= params.target_width {
        return handle_oversize(image, params);
    }

    let layout = CanvasLayout::compute(width, params);
    info!("Current size: {}x{}", width, image.height());
    info!(
        "Edge strip: {}px, padding: {}px per side",
        layout.edge_width, layout.pad_width
    );

    let mut canvas = ImageBuffer::new(params.target_width, params.target_height);

    if layout.pad_width > 0 {
        let left_strip = Rect::new(0, 0, layout.edge_width, image.height());
        let right_strip = Rect::new(width - layout.edge_width, 0, layout.edge_width, image.height());
        let left = bleed_padding(&image, left_strip, layout.pad_width, params)?;
        let right = bleed_padding(&image, right_strip, layout.pad_width, params)?;
        canvas.blit(&left, 0, 0);
        canvas.blit(&right, layout.right_x, 0);
    }
    canvas.blit(&image, layout.image_x, 0);

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> ConversionParams {
        ConversionParams {
            target_width: 160,
            target_height: 90,
            edge_blur_sigma: 4.0,
            ..Default::default()
        }
    }

    /// Every row a single colour, so left and right edges carry identical strips.
    fn row_bands(width: usize, height: usize) -> ImageBuffer {
        ImageBuffer::from_fn(width, height, |_, y| [(y * 2) as u8, 255 - (y * 2) as u8, 90])
    }

    #[test]
    fn layout_matches_the_formulas() {
        let p = ConversionParams::default();
        let l = CanvasLayout::compute(1215, &p);
        assert_eq!(l.edge_width, 12);
        assert_eq!(l.pad_width, 1312);
        assert_eq!(l.image_x, 1312);
        assert_eq!(l.right_x, 1312 + 1215);
        // narrow images still use a one column strip
        assert_eq!(CanvasLayout::compute(50, &p).edge_width, 1);
    }

    #[test]
    fn output_is_exactly_the_target_canvas() {
        let p = small_params();
        for width in [10, 33, 80, 159] {
            let out = extend_canvas(row_bands(width, 90), &p).unwrap();
            assert_eq!(out.dimensions(), (160, 90), "width {}", width);
        }
    }

    #[test]
    fn middle_is_the_source_and_odd_remainder_is_black() {
        let p = small_params();
        let src = ImageBuffer::from_fn(41, 90, |x, y| [x as u8, y as u8, 200]);
        let out = extend_canvas(src.clone(), &p).unwrap();
        // pad = (160 - 41) / 2 = 59, right pad ends at 59 + 41 + 59 = 159
        for y in [0, 45, 89] {
            for x in 0..41 {
                assert_eq!(out.pixel(59 + x, y), src.pixel(x, y));
            }
            assert_eq!(out.pixel(159, y), [0, 0, 0]);
        }
        assert_ne!(out.pixel(0, 45), [0, 0, 0]);
    }

    #[test]
    fn symmetric_edges_give_identical_paddings() {
        let p = small_params();
        let out = extend_canvas(row_bands(60, 90), &p).unwrap();
        let pad = 50;
        for y in 0..90 {
            for x in 0..pad {
                assert_eq!(out.pixel(x, y), out.pixel(pad + 60 + x, y));
            }
        }
    }

    #[test]
    fn mirrored_source_gives_mirrored_paddings() {
        // wide enough strips that each padding carries a horizontal gradient
        let p = ConversionParams { edge_percent: 20, ..small_params() };
        let w = 60;
        let src = ImageBuffer::from_fn(w, 90, |x, y| {
            let d = x.min(w - 1 - x);
            [(d * 8) as u8, (y * 2) as u8, (255 - d * 4) as u8]
        });
        let out = extend_canvas(src, &p).unwrap();
        let pad = 50;
        let close = |a: [u8; 3], b: [u8; 3]| a.iter().zip(b).all(|(&a, b)| a.abs_diff(b) <= 2);
        for y in 0..90 {
            for x in 0..pad {
                let (l, r) = (out.pixel(x, y), out.pixel(159 - x, y));
                assert!(close(l, r), "x={} y={}: {:?} vs {:?}", x, y, l, r);
            }
        }
        // the padding is not flat
        assert!(out.pixel(0, 45)[0] + 20 < out.pixel(pad - 1, 45)[0]);
    }

    #[test]
    fn height_mismatch_is_renormalized() {
        let p = small_params();
        let out = extend_canvas(row_bands(40, 45), &p).unwrap();
        assert_eq!(out.dimensions(), (160, 90));
    }

    #[test]
    fn one_column_short_gets_no_padding() {
        let p = small_params();
        let src = row_bands(159, 90);
        let out = extend_canvas(src.clone(), &p).unwrap();
        assert_eq!(out.pixel(0, 10), src.pixel(0, 10));
        assert_eq!(out.pixel(159, 10), [0, 0, 0]);
    }

    #[test]
    fn oversize_is_center_cropped_by_default() {
        let p = small_params();
        let src = ImageBuffer::from_fn(200, 90, |x, _| [x as u8, 0, 0]);
        let out = extend_canvas(src, &p).unwrap();
        assert_eq!(out.dimensions(), (160, 90));
        assert_eq!(out.pixel(0, 0), [20, 0, 0]);
        assert_eq!(out.pixel(159, 0), [179, 0, 0]);
    }

    #[test]
    fn oversize_pass_through_keeps_width() {
        let p = ConversionParams { oversize: OversizePolicy::PassThrough, ..small_params() };
        let src = row_bands(170, 90);
        let out = extend_canvas(src.clone(), &p).unwrap();
        assert_eq!(out, src);
    }
}
