//! High-level, ergonomic library API: convert a file to an output directory,
//! convert in memory, and batch helpers for directories. Prefer these entrypoints
//! over the low-level processing modules when integrating widen.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::core::buffer::ImageBuffer;
use crate::core::params::ConversionParams;
use crate::core::processing::pipeline::convert_image;
use crate::error::{Error, Result};
use crate::io::reader::{decode_image, input_format};
use crate::io::writers::jpeg::write_rgb_jpeg;
use crate::types::InputFormat;

/// Output file name for `input`: the stem with every `output_marker` removed,
/// followed by `output_suffix` and `.jpg`.
pub fn output_file_name(input: &Path, params: &ConversionParams) -> Result<String> {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .ok_or_else(|| Error::invalid("input", input.display()))?;
    let stem = if params.output_marker.is_empty() {
        stem.into_owned()
    } else {
        stem.replace(params.output_marker.as_str(), "")
    };
    Ok(format!("{}{}.jpg", stem, params.output_suffix))
}

/// Convert an already decoded image (no disk I/O).
pub fn convert_buffer(image: ImageBuffer, params: &ConversionParams) -> Result<ImageBuffer> {
    params.validate()?;
    convert_image(image, params)
}

/// Decode `input`, run the pipeline and write the JPEG into `output_dir`,
/// which is created when missing. Returns the written path.
pub fn convert_file_to_path(
    input: &Path,
    output_dir: &Path,
    params: &ConversionParams,
) -> Result<PathBuf> {
    if !input.exists() {
        return Err(Error::PathNotFound(input.to_path_buf()));
    }
    input_format(input)?;
    params.validate()?;

    let output = output_dir.join(output_file_name(input, params)?);

    let decoded = decode_image(input)?;
    info!(
        "Decoded {:?}: {}x{}",
        input,
        decoded.image.width(),
        decoded.image.height()
    );
    let result = convert_image(decoded.image, params)?;

    std::fs::create_dir_all(output_dir).map_err(|source| Error::OutputDirectory {
        path: output_dir.to_path_buf(),
        source,
    })?;
    write_rgb_jpeg(
        &output,
        &result,
        params.quality,
        params.subsampling,
        decoded.icc_profile.as_deref(),
    )?;

    info!(
        "Wrote {:?} ({}x{})",
        output,
        result.width(),
        result.height()
    );
    Ok(output)
}

/// Outcome for one file of a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<PathBuf>,
}

/// Batch processing report
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub outcomes: Vec<FileOutcome>,
}

/// Supported image files directly inside `input_dir`, sorted by path.
/// Returns the candidates and the number of entries skipped.
pub fn iterate_images(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let read_err = |source: std::io::Error| Error::ReadDirectory {
        path: input_dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in std::fs::read_dir(input_dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && InputFormat::from_path(&path).is_some() {
            files.push(path);
        } else {
            skipped += 1;
        }
    }
    files.sort();
    Ok((files, skipped))
}

/// Output names claimed by more than one input, with the inputs that claim them.
/// Only the last of those writes survives on disk.
pub fn output_collisions(
    files: &[PathBuf],
    params: &ConversionParams,
) -> Vec<(String, Vec<PathBuf>)> {
    let mut by_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        if let Ok(name) = output_file_name(file, params) {
            by_name.entry(name).or_default().push(file.clone());
        }
    }
    by_name
        .into_iter()
        .filter(|(_, inputs)| inputs.len() > 1)
        .collect()
}

/// Convert every supported image in `input_dir` into `output_dir`.
///
/// Files are independent, so they are converted in parallel on the current
/// rayon pool. A failing file is logged and counted; the batch carries on.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &ConversionParams,
) -> Result<BatchReport> {
    if !input_dir.exists() {
        return Err(Error::PathNotFound(input_dir.to_path_buf()));
    }
    params.validate()?;

    let (files, skipped) = iterate_images(input_dir)?;
    info!(
        "Found {} image(s) in {:?} ({} other entries skipped)",
        files.len(),
        input_dir,
        skipped
    );
    for (name, inputs) in output_collisions(&files, params) {
        warn!(
            "{} inputs map to the same output {:?}, only one will be kept: {:?}",
            inputs.len(),
            name,
            inputs
        );
    }

    let outcomes: Vec<FileOutcome> = files
        .into_par_iter()
        .map(|input| {
            info!("Processing: {:?}", input);
            let result = convert_file_to_path(&input, output_dir, params);
            if let Err(e) = &result {
                warn!("Error processing {:?}: {}", input, e);
            }
            FileOutcome { input, result }
        })
        .collect();

    let mut report = BatchReport {
        skipped,
        ..Default::default()
    };
    for outcome in &outcomes {
        match outcome.result {
            Ok(_) => report.processed += 1,
            Err(_) => report.errors += 1,
        }
    }
    report.outcomes = outcomes;
    Ok(report)
}
