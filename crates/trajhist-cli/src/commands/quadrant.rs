use super::{open_trajectory, progress_handler};
use crate::cli::QuadrantArgs;
use crate::config::{FileConfig, build_quadrant};
use crate::error::Result;
use crate::input::PreparedInput;
use std::fs::File;
use tracing::info;
use trajhist::analysis::progress::ProgressReporter;
use trajhist::workflows::quadrant::{self, QuadrantLineWriter};

pub fn run(args: QuadrantArgs, file: &FileConfig, quiet: bool) -> Result<()> {
    let run = build_quadrant(&args, file)?;
    let input = PreparedInput::acquire(&args.input.path, args.input.decompress.into())?;
    let mut source = open_trajectory(input.path())?;

    let mut writer = match &run.tofile {
        Some(path) => {
            info!("Streaming quadrant fractions to {:?}", path);
            Some(QuadrantLineWriter::new(File::create(path)?))
        }
        None => None,
    };

    let progress = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let outcome = quadrant::run(&mut source, &run.config, &reporter, |fractions| {
        match writer.as_mut() {
            Some(w) => w.write(fractions),
            None => Ok(()),
        }
    });
    drop(source);
    input.release();
    let results = outcome?;

    let max_spread = results.iter().map(|f| f.spread()).fold(0.0, f64::max);
    println!(
        "Counted quadrants for {} frame(s); largest spread {}",
        results.len(),
        max_spread
    );
    if let Some(path) = &run.tofile {
        println!("Per-frame fractions written to: {}", path.display());
    }
    Ok(())
}
