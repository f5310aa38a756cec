use crate::core::models::axis::Axis;
use crate::core::models::frame::ParticleFilter;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

fn check_stride(name: &'static str, stride: usize) -> Result<(), ConfigError> {
    if stride == 0 {
        return Err(invalid(name, "stride must be at least 1"));
    }
    Ok(())
}

fn check_bin_width(width: f64) -> Result<(), ConfigError> {
    if !(width.is_finite() && width > 0.0) {
        return Err(invalid("bin_width", format!("must be positive, got {}", width)));
    }
    Ok(())
}

/// Trajectory frames selected for a run: `start, start + stride, ...` while `< end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    start: usize,
    end: Option<usize>,
    stride: usize,
}

impl FrameRange {
    /// `end = None` selects every remaining frame.
    pub fn new(start: usize, end: Option<usize>, stride: usize) -> Result<Self, ConfigError> {
        check_stride("stride", stride)?;
        Ok(Self { start, end, stride })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Selected indices for a trajectory of `num_frames` frames.
    ///
    /// An explicit `end` is honoured even beyond `num_frames`; reading such a frame
    /// fails with a range error.
    pub fn indices(&self, num_frames: usize) -> impl Iterator<Item = usize> + use<> {
        let end = self.end.unwrap_or(num_frames);
        (self.start..end.max(self.start)).step_by(self.stride)
    }

    pub fn len(&self, num_frames: usize) -> usize {
        self.indices(num_frames).count()
    }
}

impl Default for FrameRange {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            stride: 1,
        }
    }
}

/// Slice over the rows of an accumulated profile table with slicing semantics:
/// `end` is clamped to the number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSelection {
    start: usize,
    end: Option<usize>,
    stride: usize,
}

impl RowSelection {
    pub fn new(start: usize, end: Option<usize>, stride: usize) -> Result<Self, ConfigError> {
        check_stride("rows.stride", stride)?;
        Ok(Self { start, end, stride })
    }

    pub fn rows(&self, num_rows: usize) -> Vec<usize> {
        let end = self.end.unwrap_or(num_rows).min(num_rows);
        (self.start.min(end)..end).step_by(self.stride).collect()
    }
}

impl Default for RowSelection {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            stride: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileConfig {
    pub frames: FrameRange,
    pub axis: Axis,
    pub bin_width: f64,
    pub rows: RowSelection,
    /// Bulk number density the profile is compared against when normalizing asymmetry.
    pub reference_density: Option<f64>,
}

#[derive(Default)]
pub struct ProfileConfigBuilder {
    frames: Option<FrameRange>,
    axis: Option<Axis>,
    bin_width: Option<f64>,
    rows: Option<RowSelection>,
    reference_density: Option<f64>,
}

impl ProfileConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(mut self, frames: FrameRange) -> Self {
        self.frames = Some(frames);
        self
    }
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }
    pub fn bin_width(mut self, width: f64) -> Self {
        self.bin_width = Some(width);
        self
    }
    pub fn rows(mut self, rows: RowSelection) -> Self {
        self.rows = Some(rows);
        self
    }
    pub fn reference_density(mut self, density: Option<f64>) -> Self {
        self.reference_density = density;
        self
    }

    pub fn build(self) -> Result<ProfileConfig, ConfigError> {
        let bin_width = self
            .bin_width
            .ok_or(ConfigError::MissingParameter("bin_width"))?;
        check_bin_width(bin_width)?;
        if let Some(density) = self.reference_density {
            if !density.is_finite() {
                return Err(invalid("reference_density", "must be finite"));
            }
        }
        Ok(ProfileConfig {
            frames: self.frames.unwrap_or_default(),
            axis: self.axis.ok_or(ConfigError::MissingParameter("axis"))?,
            bin_width,
            rows: self.rows.unwrap_or_default(),
            reference_density: self.reference_density,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuadrantConfig {
    pub frames: FrameRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityFieldConfig {
    pub frames: FrameRange,
    pub bin_width: f64,
    /// Cell axis binned along the last histogram dimension.
    pub axis: Axis,
    pub selection: ParticleFilter,
    pub output_dir: PathBuf,
    pub write_store: bool,
    /// Histogram dimension averaged out for per-frame images, if any.
    pub projection: Option<usize>,
}

#[derive(Default)]
pub struct DensityFieldConfigBuilder {
    frames: Option<FrameRange>,
    bin_width: Option<f64>,
    axis: Option<Axis>,
    selection: Option<ParticleFilter>,
    output_dir: Option<PathBuf>,
    write_store: Option<bool>,
    projection: Option<i64>,
}

impl DensityFieldConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(mut self, frames: FrameRange) -> Self {
        self.frames = Some(frames);
        self
    }
    pub fn bin_width(mut self, width: f64) -> Self {
        self.bin_width = Some(width);
        self
    }
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }
    pub fn selection(mut self, selection: ParticleFilter) -> Self {
        self.selection = Some(selection);
        self
    }
    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }
    pub fn write_store(mut self, enabled: bool) -> Self {
        self.write_store = Some(enabled);
        self
    }
    /// Negative values and values of 3 or more disable projections.
    pub fn projection(mut self, dimension: i64) -> Self {
        self.projection = Some(dimension);
        self
    }

    pub fn build(self) -> Result<DensityFieldConfig, ConfigError> {
        let bin_width = self
            .bin_width
            .ok_or(ConfigError::MissingParameter("bin_width"))?;
        check_bin_width(bin_width)?;
        let projection = self
            .projection
            .filter(|d| (0..3).contains(d))
            .map(|d| d as usize);
        Ok(DensityFieldConfig {
            frames: self.frames.unwrap_or_default(),
            bin_width,
            axis: self.axis.unwrap_or(Axis::Z),
            selection: self.selection.unwrap_or_default(),
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            write_store: self.write_store.unwrap_or(true),
            projection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_range_defaults_to_every_frame() {
        let range = FrameRange::default();
        assert_eq!(range.indices(4).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn frame_range_applies_start_end_and_stride() {
        let range = FrameRange::new(1, Some(8), 3).unwrap();
        assert_eq!(range.indices(100).collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!(range.len(100), 3);
    }

    #[test]
    fn frame_range_keeps_explicit_end_beyond_the_trajectory() {
        let range = FrameRange::new(0, Some(5), 2).unwrap();
        assert_eq!(range.indices(3).collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn frame_range_with_end_before_start_is_empty() {
        let range = FrameRange::new(5, Some(2), 1).unwrap();
        assert_eq!(range.len(10), 0);
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert!(matches!(
            FrameRange::new(0, None, 0),
            Err(ConfigError::InvalidParameter { name: "stride", .. })
        ));
        assert!(RowSelection::new(0, None, 0).is_err());
    }

    #[test]
    fn row_selection_clamps_end_like_a_slice() {
        let rows = RowSelection::new(1, Some(50), 2).unwrap();
        assert_eq!(rows.rows(6), vec![1, 3, 5]);
        assert!(RowSelection::new(9, None, 1).unwrap().rows(3).is_empty());
        assert_eq!(RowSelection::default().rows(2), vec![0, 1]);
    }

    #[test]
    fn profile_builder_requires_axis_and_width() {
        assert_eq!(
            ProfileConfigBuilder::new().axis(Axis::X).build(),
            Err(ConfigError::MissingParameter("bin_width"))
        );
        assert_eq!(
            ProfileConfigBuilder::new().bin_width(0.5).build(),
            Err(ConfigError::MissingParameter("axis"))
        );
        assert!(matches!(
            ProfileConfigBuilder::new()
                .axis(Axis::X)
                .bin_width(-1.0)
                .build(),
            Err(ConfigError::InvalidParameter {
                name: "bin_width",
                ..
            })
        ));
    }

    #[test]
    fn profile_builder_fills_defaults() {
        let config = ProfileConfigBuilder::new()
            .axis(Axis::Y)
            .bin_width(0.5)
            .build()
            .unwrap();
        assert_eq!(config.frames, FrameRange::default());
        assert_eq!(config.rows, RowSelection::default());
        assert_eq!(config.reference_density, None);
    }

    #[test]
    fn density_field_builder_disables_out_of_range_projection() {
        let base = || {
            DensityFieldConfigBuilder::new()
                .bin_width(1.0)
                .output_dir(PathBuf::from("out"))
        };
        assert_eq!(base().projection(-1).build().unwrap().projection, None);
        assert_eq!(base().projection(3).build().unwrap().projection, None);
        assert_eq!(base().projection(1).build().unwrap().projection, Some(1));

        let config = base().build().unwrap();
        assert_eq!(config.axis, Axis::Z);
        assert!(config.write_store);
        assert!(config.selection.is_all());
    }
}
