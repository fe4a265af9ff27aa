use tracing::{debug, info};

use crate::core::buffer::ImageBuffer;
use crate::core::params::ConversionParams;
use crate::core::processing::blur::gaussian_blur;
use crate::error::Result;
use crate::types::Rect;

/// Watermark band anchored at the bottom-left corner of a `width`x`height` image.
pub fn watermark_region(width: usize, height: usize, params: &ConversionParams) -> Rect {
    let band_width = ((width as f64 * params.watermark_width_ratio) as usize).min(width);
    let band_height = ((height as f64 * params.watermark_height_ratio) as usize).min(height);
    Rect::new(0, height - band_height, band_width, band_height)
}

/// Smear a blurred copy of the band's top row over the whole watermark band.
///
/// Every row of the band receives the blurred patch's first row, column by
/// column, so the band ends up vertically uniform. Dimensions are unchanged.
pub fn remove_watermark(mut image: ImageBuffer, params: &ConversionParams) -> Result<ImageBuffer> {
    let region = watermark_region(image.width(), image.height(), params);
    info!(
        "Watermark region: {}x{} at ({}, {})",
        region.width, region.height, region.x, region.y
    );
    if region.is_empty() {
        debug!("Watermark region is empty, nothing to remove");
        return Ok(image);
    }

    let patch = image.crop(region)?;
    let blurred = gaussian_blur(&patch, params.watermark_blur_sigma);

    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            image.put_pixel(x, y, blurred.pixel(x - region.x, 0));
        }
    }

    Ok(image)
}
