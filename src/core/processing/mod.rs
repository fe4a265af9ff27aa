pub mod blur;
pub mod canvas;
pub mod pipeline;
pub mod resize;
pub mod trim;
pub mod watermark;
