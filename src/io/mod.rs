//! I/O layer: decoding supported still-image formats into `ImageBuffer`s
//! (`reader`) and encoding the finished canvas (`writers`).
pub mod reader;
pub use reader::{DecodedImage, decode_image, input_format};

pub mod writers;
