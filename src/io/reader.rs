use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageReader, Limits};
use tracing::{debug, warn};

use crate::core::buffer::ImageBuffer;
use crate::error::{Error, Result};
use crate::types::InputFormat;

/// A decoded input, flattened to 8-bit RGB.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: ImageBuffer,
    pub format: InputFormat,
    /// Embedded ICC profile, carried through to the output untouched
    pub icc_profile: Option<Vec<u8>>,
}

/// Upper bound on decoder allocations. Source stills are often 10000px+ on
/// the long side and may be 16-bit RGBA, far past the `image` default of 512 MiB.
pub const DECODE_MAX_ALLOC: u64 = 8 * 1024 * 1024 * 1024;

pub(crate) fn decode_limits() -> Limits {
    let mut limits = Limits::no_limits();
    limits.max_alloc = Some(DECODE_MAX_ALLOC);
    limits
}

/// Classify `path` by extension, rejecting anything outside the supported set.
pub fn input_format(path: &Path) -> Result<InputFormat> {
    InputFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_else(|| "no extension".to_string()),
    })
}

/// Decode a JPEG, PNG, BMP or TIFF file. Alpha is dropped.
pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }
    let format = input_format(path)?;

    let decode_err = |source: image::ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?;
    reader.limits(decode_limits());
    let mut decoder = reader.into_decoder().map_err(decode_err)?;

    let icc_profile = match decoder.icc_profile() {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Ignoring unreadable ICC profile in {:?}: {}", path, e);
            None
        }
    };

    let rgb = DynamicImage::from_decoder(decoder)
        .map_err(decode_err)?
        .into_rgb8();
    let (width, height) = rgb.dimensions();
    debug!(
        "Decoded {:?} as {}: {}x{}, icc={}",
        path,
        format,
        width,
        height,
        icc_profile.as_ref().map_or(0, |p| p.len())
    );

    Ok(DecodedImage {
        image: ImageBuffer::from_raw(width as usize, height as usize, rgb.into_raw())?,
        format,
        icc_profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_path_not_found() {
        let err = decode_image(Path::new("/nonexistent/widen/input.png")).unwrap_err();
        assert!(matches!(err, Error::PathNotFound(_)));
    }

    #[test]
    fn gif_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.GIF");
        std::fs::write(&path, b"GIF89a").unwrap();
        match decode_image(&path) {
            Err(Error::UnsupportedFormat { extension, .. }) => assert_eq!(extension, ".GIF"),
            other => panic!("unexpected: {:?}", other.map(|d| d.format)),
        }
    }

    #[test]
    fn png_decodes_to_rgb_without_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let src = image::RgbaImage::from_fn(5, 4, |x, y| image::Rgba([x as u8 * 10, y as u8 * 20, 7, 0]));
        src.save(&path).unwrap();

        let decoded = decode_image(&path).unwrap();
        assert_eq!(decoded.format, InputFormat::Png);
        assert_eq!(decoded.image.dimensions(), (5, 4));
        assert_eq!(decoded.image.pixel(4, 3), [40, 60, 7]);
    }

    #[test]
    fn limits_admit_large_sixteen_bit_stills() {
        let limits = decode_limits();
        // 10000 x 30000 RGBA16
        let bytes = 10_000u64 * 30_000 * 4 * 2;
        assert!(limits.max_alloc.is_some_and(|max| max >= bytes));
        assert_eq!(limits.max_image_width, None);
        assert_eq!(limits.max_image_height, None);
        assert!(Limits::default().max_alloc.is_some_and(|max| max < bytes));
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        assert!(matches!(decode_image(&path), Err(Error::Decode { .. })));
    }
}
