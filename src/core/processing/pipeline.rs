use tracing::info;

use crate::core::buffer::ImageBuffer;
use crate::core::params::ConversionParams;
use crate::core::processing::canvas::extend_canvas;
use crate::core::processing::resize::normalize_height;
use crate::core::processing::trim::trim_background;
use crate::core::processing::watermark::remove_watermark;
use crate::error::Result;

/// Run the four in-memory stages in order: watermark removal, background trim,
/// height normalization, canvas extension. Each stage consumes the previous
/// stage's output; the first failure aborts the conversion.
pub fn convert_image(image: ImageBuffer, params: &ConversionParams) -> Result<ImageBuffer> {
    info!("Step 1: watermark removal ({}x{})", image.width(), image.height());
    let image = remove_watermark(image, params)?;

    info!("Step 2: background trim and resize");
    let image = trim_background(image, params)?;
    let image = normalize_height(image, params.target_height)?;

    info!("Step 3: 16:9 canvas extension");
    let image = extend_canvas(image, params)?;

    info!("Result size: {}x{}", image.width(), image.height());
    Ok(image)
}
