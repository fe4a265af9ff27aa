use std::io::{BufWriter, Write};
use std::path::Path;

use jpeg_encoder::{ColorType, Encoder, SamplingFactor};
use tempfile::NamedTempFile;

use crate::core::buffer::ImageBuffer;
use crate::core::params::JPEG_MAX_DIMENSION;
use crate::error::{Error, Result};
use crate::types::ChromaSubsampling;

fn sampling_factor(subsampling: ChromaSubsampling) -> SamplingFactor {
    match subsampling {
        ChromaSubsampling::Full => SamplingFactor::R_4_4_4,
        ChromaSubsampling::Half => SamplingFactor::R_4_2_2,
        ChromaSubsampling::Quarter => SamplingFactor::R_4_2_0,
    }
}

/// Encode `image` as a baseline RGB JPEG at `output`.
///
/// The bytes go to a temporary file next to `output` which is renamed into
/// place only once encoding has finished, so a failure never leaves a
/// truncated JPEG behind.
pub fn write_rgb_jpeg(
    output: &Path,
    image: &ImageBuffer,
    quality: u8,
    subsampling: ChromaSubsampling,
    icc_profile: Option<&[u8]>,
) -> Result<()> {
    let (cols, rows) = image.dimensions();
    if cols > JPEG_MAX_DIMENSION || rows > JPEG_MAX_DIMENSION {
        return Err(Error::ImageTooLarge {
            width: cols,
            height: rows,
        });
    }

    let write_err = |source: std::io::Error| Error::Write {
        path: output.to_path_buf(),
        source,
    };
    let encode_err = |e: jpeg_encoder::EncodingError| Error::Encode {
        path: output.to_path_buf(),
        message: e.to_string(),
    };

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let mut encoder = Encoder::new(&mut writer, quality);
        encoder.set_sampling_factor(sampling_factor(subsampling));
        if let Some(profile) = icc_profile {
            encoder.add_icc_profile(profile).map_err(encode_err)?;
        }
        encoder
            .encode(&image.as_raw(), cols as u16, rows as u16, ColorType::Rgb)
            .map_err(encode_err)?;
        writer.flush().map_err(write_err)?;
    }

    tmp.persist(output).map_err(|e| write_err(e.error))?;
    Ok(())
}
