use super::config::ProfileConfig;
use super::error::AnalysisError;
use super::progress::{Progress, ProgressReporter};
use crate::core::binning::edges::BinEdges;
use crate::core::binning::histogram::{Histogram, histogram_1d};
use crate::core::io::source::FrameSource;
use crate::core::models::axis::Axis;
use crate::core::models::cell::SimulationCell;
use tracing::{debug, info, trace};

/// Reference frame for the cell geometry and bulk particle count.
const REFERENCE_FRAME: usize = 0;

/// Per-frame 1-D histograms sharing one set of bin edges, one row per sampled frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    axis: Axis,
    edges: BinEdges,
    cell: SimulationCell,
    reference_particles: usize,
    frames: Vec<usize>,
    rows: Vec<Histogram>,
}

impl ProfileTable {
    pub fn new(
        axis: Axis,
        edges: BinEdges,
        cell: SimulationCell,
        reference_particles: usize,
    ) -> Self {
        Self {
            axis,
            edges,
            cell,
            reference_particles,
            frames: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Appends the histogram of `frame`. Rows must share the table's bin count.
    pub fn push(&mut self, frame: usize, row: Histogram) -> Result<(), AnalysisError> {
        if row.len() != self.edges.num_bins() {
            return Err(AnalysisError::Domain(format!(
                "row for frame {} has {} bins, table expects {}",
                frame,
                row.len(),
                self.edges.num_bins()
            )));
        }
        self.frames.push(frame);
        self.rows.push(row);
        Ok(())
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    pub fn cell(&self) -> &SimulationCell {
        &self.cell
    }

    pub fn rows(&self) -> &[Histogram] {
        &self.rows
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bin centers along the profiled axis.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.centers()
    }

    /// Overall number density of the reference frame.
    pub fn bulk_density(&self) -> f64 {
        self.reference_particles as f64 / self.cell.volume()
    }
}

/// Bins particle coordinates along one axis for every selected frame.
pub struct ProfileAccumulator<'a> {
    config: &'a ProfileConfig,
    reporter: &'a ProgressReporter<'a>,
}

impl<'a> ProfileAccumulator<'a> {
    pub fn new(config: &'a ProfileConfig, reporter: &'a ProgressReporter<'a>) -> Self {
        Self { config, reporter }
    }

    /// Builds the profile table frame by frame, in increasing frame order.
    ///
    /// Fails with [`AnalysisError::Range`] as soon as a selected frame cannot be read;
    /// no row is recorded for that frame.
    pub fn accumulate<S: FrameSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<ProfileTable, AnalysisError> {
        let axis = self.config.axis;
        let reference = source.read_frame(REFERENCE_FRAME)?;
        let edges = reference.cell.bin_edges(axis, self.config.bin_width)?;
        debug!(
            "Profiling along {} with {} bins of width {} from {} to {}",
            axis,
            edges.num_bins(),
            edges.width(),
            edges.first(),
            edges.last()
        );

        let mut table = ProfileTable::new(axis, edges, reference.cell, reference.num_particles());
        let indices: Vec<usize> = self.config.frames.indices(source.num_frames()).collect();

        self.reporter.start_frames("Accumulating profiles", indices.len());
        for index in indices {
            let frame = source.read_frame(index)?;
            let row = histogram_1d(frame.coordinates(axis), table.edges());
            trace!(
                "Frame {}: {} of {} particles binned",
                index,
                row.total(),
                frame.num_particles()
            );
            table.push(index, row)?;
            self.reporter.report(Progress::FrameDone { frame: index });
        }
        self.reporter.finish_frames();

        info!("Accumulated {} profile(s) along {}.", table.num_rows(), axis);
        Ok(table)
    }
}
