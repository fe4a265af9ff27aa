use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use tracing::info;

use crate::core::buffer::ImageBuffer;
use crate::error::{Error, Result};

/// Width that keeps the aspect ratio at `target_height`, rounded, never below 1.
pub fn normalized_width(original_cols: usize, original_rows: usize, target_height: usize) -> usize {
    if original_rows == 0 {
        return 0;
    }
    let scale = target_height as f64 / original_rows as f64;
    ((original_cols as f64 * scale).round() as usize).max(1)
}

/// Lanczos3 resample of an RGB buffer to exactly `target_cols`x`target_rows`.
pub fn resize_rgb(image: &ImageBuffer, target_cols: usize, target_rows: usize) -> Result<ImageBuffer> {
    let (original_cols, original_rows) = image.dimensions();
    if image.is_empty() || target_cols == 0 || target_rows == 0 {
        return Err(Error::Resize(format!(
            "cannot resize {}x{} to {}x{}",
            original_cols, original_rows, target_cols, target_rows
        )));
    }

    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        original_cols as u32,
        original_rows as u32,
        image.as_raw().into_owned(),
        PixelType::U8x3,
    )
    .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols as u32, target_rows as u32, PixelType::U8x3);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    ImageBuffer::from_raw(target_cols, target_rows, dst_image.into_vec())
}

/// Rescale to `target_height`, keeping the aspect ratio. The resampler runs even
/// when the height already matches.
pub fn normalize_height(image: ImageBuffer, target_height: usize) -> Result<ImageBuffer> {
    let (original_cols, original_rows) = image.dimensions();
    let new_cols = normalized_width(original_cols, original_rows, target_height);

    info!(
        "Original size: {}x{}, New size: {}x{}",
        original_cols, original_rows, new_cols, target_height
    );

    resize_rgb(&image, new_cols, target_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near(a: [u8; 3], b: [u8; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(&p, &q)| (p as i16 - q as i16).abs() <= 1)
    }

    #[test]
    fn normalized_width_rounds() {
        assert_eq!(normalized_width(1000, 500, 2160), 4320);
        assert_eq!(normalized_width(1000, 3000, 2160), 720);
        // 333 * 2160 / 1000 = 719.28
        assert_eq!(normalized_width(333, 1000, 2160), 719);
        // 335 * 2160 / 1000 = 723.6
        assert_eq!(normalized_width(335, 1000, 2160), 724);
        assert_eq!(normalized_width(1, 10000, 10), 1);
    }

    #[test]
    fn height_is_exact_and_width_follows_aspect() {
        let img = ImageBuffer::from_fn(90, 40, |x, y| [(x * 2) as u8, (y * 5) as u8, 77]);
        let out = normalize_height(img, 60).unwrap();
        assert_eq!(out.dimensions(), (135, 60));
    }

    #[test]
    fn same_height_still_resamples_to_same_size() {
        let img = ImageBuffer::filled(30, 20, [5, 6, 7]);
        let out = normalize_height(img.clone(), 20).unwrap();
        assert_eq!(out.dimensions(), (30, 20));
        assert!(near(out.pixel(0, 0), img.pixel(0, 0)));
        assert!(near(out.pixel(29, 19), img.pixel(29, 19)));
    }

    #[test]
    fn uniform_colour_survives_lanczos() {
        let img = ImageBuffer::filled(7, 3, [200, 100, 50]);
        let out = resize_rgb(&img, 40, 25).unwrap();
        assert_eq!(out.dimensions(), (40, 25));
        for (x, y) in [(0, 0), (39, 24), (20, 12)] {
            assert!(near(out.pixel(x, y), [200, 100, 50]));
        }
    }

    #[test]
    fn zero_target_is_rejected() {
        let img = ImageBuffer::filled(4, 4, [0, 0, 0]);
        assert!(matches!(resize_rgb(&img, 0, 4), Err(Error::Resize(_))));
    }
}
