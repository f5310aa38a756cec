use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileFrames};
use crate::cli::{DensityFieldArgs, FrameArgs, ProfileArgs, QuadrantArgs};
use crate::error::{CliError, Result};
use std::path::PathBuf;
use trajhist::analysis::config::{
    ConfigError, DensityFieldConfig, DensityFieldConfigBuilder, FrameRange, ProfileConfig,
    ProfileConfigBuilder, QuadrantConfig, RowSelection,
};
use trajhist::core::models::axis::Axis;
use trajhist::core::models::frame::ParticleFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRun {
    pub config: ProfileConfig,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuadrantRun {
    pub config: QuadrantConfig,
    pub tofile: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityFieldRun {
    pub config: DensityFieldConfig,
    pub average: bool,
}

pub fn build_profile(args: &ProfileArgs, file: &FileConfig) -> Result<ProfileRun> {
    let defaults = DefaultsConfig::default();
    let frames = frame_range(&args.frames, file.frames, &defaults)?;
    let section = file.profile.clone().unwrap_or_default();

    let axis = parse_axis(args.axis.or(section.axis).unwrap_or(defaults.profile_axis))?;
    let rows = RowSelection::new(
        args.stats_start.or(section.stats_start).unwrap_or(0),
        args.stats_end.or(section.stats_end),
        args.stats_stride.or(section.stats_stride).unwrap_or(1),
    )
    .map_err(config_error)?;

    let config = ProfileConfigBuilder::new()
        .frames(frames)
        .axis(axis)
        .bin_width(args.bin.or(section.bin).unwrap_or(defaults.profile_bin_width))
        .rows(rows)
        .reference_density(args.reference_density.or(section.reference_density))
        .build()
        .map_err(config_error)?;

    Ok(ProfileRun {
        config,
        output: args.output.clone().or(section.output),
    })
}

pub fn build_quadrant(args: &QuadrantArgs, file: &FileConfig) -> Result<QuadrantRun> {
    let defaults = DefaultsConfig::default();
    let section = file.quadrant.clone().unwrap_or_default();
    Ok(QuadrantRun {
        config: QuadrantConfig {
            frames: frame_range(&args.frames, file.frames, &defaults)?,
        },
        tofile: args.tofile.clone().or(section.tofile),
    })
}

pub fn build_density_field(args: &DensityFieldArgs, file: &FileConfig) -> Result<DensityFieldRun> {
    let defaults = DefaultsConfig::default();
    let section = file.density_field.clone().unwrap_or_default();

    let selection = args
        .selection
        .as_deref()
        .or(section.selection.as_deref())
        .unwrap_or(defaults.selection.as_str());
    let write_store = if args.nohdf5 {
        false
    } else {
        section.store.unwrap_or(true)
    };

    let config = DensityFieldConfigBuilder::new()
        .frames(frame_range(&args.frames, file.frames, &defaults)?)
        .bin_width(args.dl.or(section.dl).unwrap_or(defaults.field_bin_width))
        .axis(parse_axis(args.axis.or(section.axis).unwrap_or(defaults.field_axis))?)
        .selection(ParticleFilter::from_selection(selection))
        .output_dir(args.folder.clone())
        .write_store(write_store)
        .projection(args.map2d.or(section.map2d).unwrap_or(defaults.projection))
        .build()
        .map_err(config_error)?;

    Ok(DensityFieldRun {
        config,
        average: args.average,
    })
}

fn frame_range(
    cli: &FrameArgs,
    file: Option<FileFrames>,
    defaults: &DefaultsConfig,
) -> Result<FrameRange> {
    let file = file.unwrap_or_default();
    FrameRange::new(
        cli.start.or(file.start).unwrap_or(defaults.start),
        cli.end.or(file.end),
        cli.stride.or(file.stride).unwrap_or(defaults.stride),
    )
    .map_err(config_error)
}

fn parse_axis(value: i64) -> Result<Axis> {
    Axis::try_from(value).map_err(|e| CliError::Config(e.to_string()))
}

fn config_error(e: ConfigError) -> CliError {
    CliError::Config(e.to_string())
}
