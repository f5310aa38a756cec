use super::{open_trajectory, progress_handler};
use crate::cli::ProfileArgs;
use crate::config::{FileConfig, build_profile};
use crate::error::Result;
use crate::input::PreparedInput;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;
use trajhist::analysis::progress::ProgressReporter;
use trajhist::workflows::profile;

pub fn run(args: ProfileArgs, file: &FileConfig, quiet: bool) -> Result<()> {
    let run = build_profile(&args, file)?;
    let input = PreparedInput::acquire(&args.input.path, args.input.decompress.into())?;
    let mut source = open_trajectory(input.path())?;

    let progress = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let outcome = profile::run(&mut source, &run.config, &reporter);
    drop(source);
    input.release();
    let result = outcome?;

    if let Some(path) = &run.output {
        info!("Writing averaged profile to {:?}", path);
        profile::write_profile(BufWriter::new(File::create(path)?), &result.stats)?;
        println!("Profile written to: {}", path.display());
    }
    println!(
        "Asymmetry along {} over {} profile(s): {}",
        result.stats.axis, result.stats.rows_used, result.asymmetry
    );
    Ok(())
}
