use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Density profiles, quadrant occupancy and 3-D density fields from MD trajectories.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Optional TOML file providing defaults for any subcommand option
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lateral density profile along one axis and its asymmetry score.
    Profile(ProfileArgs),
    /// Fraction of particles in each quadrant of the xy plane, frame by frame.
    Quadrant(QuadrantArgs),
    /// Per-frame 3-D histograms written to a volume store and optional images.
    DensityField(DensityFieldArgs),
}

/// Trajectory file and how to prepare it.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Trajectory file (LAMMPS text dump), optionally gzip-compressed.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[command(flatten)]
    pub decompress: DecompressFlags,
}

/// Mutually exclusive ways of handling a `.gz` input.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct DecompressFlags {
    /// Decompress a .gz input next to it and delete the copy when done.
    #[arg(long)]
    pub unzip: bool,
    /// Decompress a .gz input next to it and keep the copy.
    #[arg(long)]
    pub zcat: bool,
}

/// Frame selection shared by every subcommand.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FrameArgs {
    /// First frame to analyse
    #[arg(long, value_name = "INT")]
    pub start: Option<usize>,
    /// Stop before this frame (defaults to the number of frames)
    #[arg(long, value_name = "INT")]
    pub end: Option<usize>,
    /// Step between analysed frames
    #[arg(long, value_name = "INT")]
    pub stride: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub frames: FrameArgs,

    /// Bin width along the profiled axis
    #[arg(long, value_name = "FLOAT")]
    pub bin: Option<f64>,

    /// Profiled axis (0, 1 or 2)
    #[arg(short, long, visible_alias = "ax", value_name = "INT")]
    pub axis: Option<i64>,

    /// Bulk number density used to normalize the asymmetry score
    #[arg(long, value_name = "FLOAT")]
    pub reference_density: Option<f64>,

    /// First accumulated profile included in the statistics
    #[arg(long, value_name = "INT")]
    pub stats_start: Option<usize>,

    /// Stop the statistics before this accumulated profile
    #[arg(long, value_name = "INT")]
    pub stats_end: Option<usize>,

    /// Step between accumulated profiles included in the statistics
    #[arg(long, value_name = "INT")]
    pub stats_stride: Option<usize>,

    /// Write the averaged profile table to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct QuadrantArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub frames: FrameArgs,

    /// Write one `frame q1 q2 q3 q4 spread` line per frame to this file
    #[arg(long, visible_alias = "tf", value_name = "PATH")]
    pub tofile: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DensityFieldArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory receiving the volume store and images
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    #[command(flatten)]
    pub frames: FrameArgs,

    /// Bin width of the 3-D grid
    #[arg(long, value_name = "FLOAT")]
    pub dl: Option<f64>,

    /// Keep only particles of this species ("None" keeps every particle)
    #[arg(long, value_name = "NAME")]
    pub selection: Option<String>,

    /// Do not write the volume store
    #[arg(long)]
    pub nohdf5: bool,

    /// Histogram dimension averaged out for per-frame PNG images (-1 disables)
    #[arg(long, value_name = "INT", allow_negative_numbers = true)]
    pub map2d: Option<i64>,

    /// Accepted for compatibility; has no effect
    #[arg(long)]
    pub average: bool,

    /// Cell axis placed last in the histogram dimensions
    #[arg(long, value_name = "INT")]
    pub axis: Option<i64>,
}
