use super::{open_trajectory, progress_handler};
use crate::cli::DensityFieldArgs;
use crate::config::{FileConfig, build_density_field};
use crate::error::Result;
use crate::input::PreparedInput;
use tracing::{info, warn};
use trajhist::analysis::progress::ProgressReporter;
use trajhist::workflows::density_field;

pub fn run(args: DensityFieldArgs, file: &FileConfig, quiet: bool) -> Result<()> {
    let run = build_density_field(&args, file)?;
    if run.average {
        warn!("--average has no effect; every frame is stored individually.");
    }

    let input = PreparedInput::acquire(&args.input.path, args.input.decompress.into())?;
    let mut source = open_trajectory(input.path())?;

    info!(
        "Binning volume fields with dl = {} into {:?}",
        run.config.bin_width, run.config.output_dir
    );
    let progress = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let outcome = density_field::run(&mut source, &run.config, &reporter);
    drop(source);
    input.release();
    let summary = outcome?;

    println!(
        "Binned {} frame(s) on a {}x{}x{} grid.",
        summary.frames.len(),
        summary.shape[0],
        summary.shape[1],
        summary.shape[2]
    );
    if let Some(path) = &summary.store_path {
        println!("Volume store written to: {}", path.display());
    }
    if !summary.images.is_empty() {
        println!(
            "{} projection image(s) written to: {}",
            summary.images.len(),
            run.config.output_dir.display()
        );
    }
    Ok(())
}
