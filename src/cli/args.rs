use clap::Parser;
use std::path::PathBuf;

use widen::OversizePolicy;

#[derive(Parser)]
#[command(
    name = "widen",
    version,
    about = "Widen images to a 16:9 canvas with blurred edge padding"
)]
pub struct CliArgs {
    /// Input image file, or a directory whose supported images are all converted
    pub input: Option<PathBuf>,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = "widened")]
    pub output_dir: PathBuf,

    /// JSON file with conversion parameters; missing keys keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JPEG quality (1-100), overrides the config
    #[arg(short, long)]
    pub quality: Option<u8>,

    /// Canvas width in pixels, overrides the config
    #[arg(long)]
    pub target_width: Option<usize>,

    /// Canvas height in pixels, overrides the config
    #[arg(long)]
    pub target_height: Option<usize>,

    /// What to do with images already wider than the canvas (center-crop, pass-through)
    #[arg(long, value_enum)]
    pub oversize: Option<OversizePolicy>,

    /// Number of worker threads for directory input (defaults to all cores)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
