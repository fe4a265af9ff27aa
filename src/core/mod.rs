//! Core processing building blocks: the RGB `ImageBuffer`, conversion
//! parameters, and the pixel stages (blur, watermark, trim, resize, canvas)
//! composed by the pipeline. These are primitives consumed by the `api` module.
pub mod buffer;
pub mod params;
pub mod processing;
