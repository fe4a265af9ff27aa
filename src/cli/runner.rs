use std::io::IsTerminal;
use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use widen::api::{convert_file_to_path, process_directory_to_path};
use widen::io::input_format;
use widen::ConversionParams;

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Config file first, then individual command-line overrides.
fn load_params(args: &CliArgs) -> Result<ConversionParams, AppError> {
    let mut params = match &args.config {
        Some(path) => ConversionParams::from_json_file(path)?,
        None => ConversionParams::default(),
    };
    if let Some(q) = args.quality {
        params.quality = q;
    }
    if let Some(w) = args.target_width {
        params.target_width = w;
    }
    if let Some(h) = args.target_height {
        params.target_height = h;
    }
    if let Some(policy) = args.oversize {
        params.oversize = policy;
    }
    params.validate()?;
    Ok(params)
}

fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    params: &ConversionParams,
    jobs: Option<usize>,
) -> Result<(), AppError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()?;

    info!("Starting batch processing from directory: {:?}", input_dir);
    info!("Output directory: {:?}", output_dir);

    let report = pool.install(|| process_directory_to_path(input_dir, output_dir, params))?;

    info!("Batch processing complete!");
    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);
    Ok(())
}

fn execute(args: &CliArgs) -> Result<(), AppError> {
    let input = args.input.as_deref().ok_or_else(|| AppError::MissingArgument {
        arg: "<INPUT>".to_string(),
    })?;
    if !input.exists() {
        return Err(AppError::PathNotFound {
            path: input.to_path_buf(),
        });
    }
    let params = load_params(args)?;

    if input.is_dir() {
        process_directory(input, &args.output_dir, &params, args.jobs)
    } else {
        input_format(input)?;
        let output = convert_file_to_path(input, &args.output_dir, &params)?;
        info!("Successfully processed: {:?} -> {:?}", input, output);
        Ok(())
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.verbose);

    if let Err(e) = execute(&args) {
        error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}
