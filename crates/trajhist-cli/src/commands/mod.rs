pub mod density_field;
pub mod profile;
pub mod quadrant;

use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use trajhist::core::io::error::TrajectoryError;
use trajhist::core::io::lammps::LammpsDumpReader;
use trajhist::core::io::source::FrameSource;
use tracing::info;

type DumpReader = LammpsDumpReader<BufReader<File>>;

fn open_trajectory(path: &Path) -> Result<DumpReader> {
    info!("Indexing trajectory {:?}", path);
    let reader = LammpsDumpReader::open(path).map_err(|e| match e {
        TrajectoryError::Io(source) => CliError::InputAccess {
            path: path.to_path_buf(),
            source,
        },
        other => CliError::FileParsing {
            path: path.to_path_buf(),
            source: other.into(),
        },
    })?;
    info!("Trajectory has {} frame(s).", reader.num_frames());
    Ok(reader)
}

fn progress_handler(quiet: bool) -> CliProgressHandler {
    if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    }
}
