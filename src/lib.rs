#![doc = r#"
widen — turn a still image into a fixed-size 16:9 canvas.

The conversion runs four stages over an in-memory RGB buffer:

1. **Watermark removal**: the bottom-left band (23% x 4% by default) is
   overwritten with a blurred smear of its top row.
2. **Background trim**: uniform padding above and below the content is
   detected against the top-left corner colour and cropped away.
3. **Height normalization**: Lanczos3 rescale to the target height,
   preserving the aspect ratio.
4. **Canvas extension**: the left and right edge strips are stretched and
   heavily blurred into "bleed" padding that fills the canvas to the target
   width, instead of solid letterbox bars.

The crate powers the `widen` CLI and can be embedded in your own tools.

Convert a file
--------------
```rust,no_run
use std::path::Path;
use widen::{convert_file_to_path, ConversionParams};

fn main() -> widen::Result<()> {
    let written = convert_file_to_path(
        Path::new("/photos/skyline-10000px.png"),
        Path::new("/out"),
        &ConversionParams::default(),
    )?;
    println!("wrote {}", written.display()); // /out/skyline-4k.jpg
    Ok(())
}
```

Convert in memory
-----------------
```rust
use widen::{convert_buffer, ConversionParams, ImageBuffer};

fn main() -> widen::Result<()> {
    let params = ConversionParams {
        target_width: 320,
        target_height: 180,
        ..Default::default()
    };
    let portrait = ImageBuffer::from_fn(90, 160, |x, y| [x as u8, y as u8, 128]);
    let canvas = convert_buffer(portrait, &params)?;
    assert_eq!(canvas.dimensions(), (320, 180));
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use widen::{process_directory_to_path, ConversionParams};

fn main() -> widen::Result<()> {
    let report = process_directory_to_path(
        Path::new("/photos"),
        Path::new("/out"),
        &ConversionParams::default(),
    )?;
    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `widen::Result<T>`; match on `widen::Error` to
handle specific cases.

```rust,no_run
use std::path::Path;
use widen::{convert_file_to_path, ConversionParams, Error};

fn main() {
    match convert_file_to_path(Path::new("clip.gif"), Path::new("out"), &ConversionParams::default()) {
        Ok(path) => println!("{}", path.display()),
        Err(Error::UnsupportedFormat { extension, .. }) => eprintln!("cannot read {extension} files"),
        Err(Error::PathNotFound(p)) => eprintln!("missing: {}", p.display()),
        Err(other) => eprintln!("failed: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points and batch helpers.
- [`core`] — `ImageBuffer`, `ConversionParams` and the processing stages.
- [`io`] — decoding inputs and writing JPEG output.
- [`types`] — geometry, colour and policy enums.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::buffer::ImageBuffer;
pub use core::params::ConversionParams;
pub use error::{Error, Result};
pub use types::{ChromaSubsampling, Color, InputFormat, OversizePolicy, Rect, StrideStrategy};

// Stages
pub use core::processing::canvas::{CanvasLayout, extend_canvas};
pub use core::processing::pipeline::convert_image;
pub use core::processing::resize::normalize_height;
pub use core::processing::trim::{TrimBounds, detect_background_bounds, trim_background};
pub use core::processing::watermark::remove_watermark;

// High-level API re-exports
pub use api::{
    BatchReport, FileOutcome, convert_buffer, convert_file_to_path, iterate_images,
    output_collisions, output_file_name, process_directory_to_path,
};
