use crate::analysis::accumulator::{ProfileAccumulator, ProfileTable};
use crate::analysis::config::ProfileConfig;
use crate::analysis::error::AnalysisError;
use crate::analysis::progress::ProgressReporter;
use crate::analysis::stats::{ProfileStats, StatsReducer};
use crate::core::io::source::FrameSource;
use std::io::Write;
use tracing::{info, instrument};

const PROFILE_HEADER: [&str; 4] = ["x", "avg", "std", "density"];

#[derive(Debug, Clone)]
pub struct ProfileResult {
    pub table: ProfileTable,
    pub stats: ProfileStats,
    pub asymmetry: f64,
}

/// Accumulates the profile table, reduces it and scores its asymmetry.
///
/// The table is returned even though only the statistics are needed for the score, so
/// callers can re-reduce it with another row selection.
#[instrument(skip_all, name = "profile_workflow")]
pub fn run<S: FrameSource + ?Sized>(
    source: &mut S,
    config: &ProfileConfig,
    reporter: &ProgressReporter,
) -> Result<ProfileResult, AnalysisError> {
    info!(
        "Profiling {} frame(s) along {} with bin width {}.",
        config.frames.len(source.num_frames()),
        config.axis,
        config.bin_width
    );

    let table = ProfileAccumulator::new(config, reporter).accumulate(source)?;
    let stats = StatsReducer::new(config.rows, config.reference_density).reduce(&table)?;
    let asymmetry = stats.asymmetry()?;

    info!(
        "Asymmetry along {}: {} (normalization {}).",
        stats.axis, asymmetry, stats.normalization
    );
    Ok(ProfileResult {
        table,
        stats,
        asymmetry,
    })
}

/// Writes the averaged profile as space-separated columns `x avg std density`.
pub fn write_profile<W: Write>(writer: W, stats: &ProfileStats) -> Result<(), AnalysisError> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(writer);
    out.write_record(PROFILE_HEADER)?;
    for i in 0..stats.x.len() {
        out.write_record([
            stats.x[i].to_string(),
            stats.avg_profile[i].to_string(),
            stats.std_profile[i].to_string(),
            stats.avg_density[i].to_string(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
