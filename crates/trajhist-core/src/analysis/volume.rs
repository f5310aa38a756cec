use super::error::AnalysisError;
use crate::core::binning::edges::BinEdges;
use crate::core::binning::histogram::{Histogram3D, histogram_3d};
use crate::core::io::store::VolumeMetadata;
use crate::core::models::axis::Axis;
use crate::core::models::cell::SimulationCell;
use crate::core::models::frame::Frame;

/// Coarse-grained 3-D particle counts over a fixed grid derived from a reference cell.
///
/// Histogram dimensions follow [`Axis::ordering_last`]: the two remaining axes in
/// increasing order, then the requested axis.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeField {
    axes: [Axis; 3],
    edges: [BinEdges; 3],
    lengths: [f64; 3],
}

impl VolumeField {
    pub fn new(cell: &SimulationCell, axis: Axis, bin_width: f64) -> Result<Self, AnalysisError> {
        let axes = axis.ordering_last();
        let edges = [
            cell.bin_edges(axes[0], bin_width)?,
            cell.bin_edges(axes[1], bin_width)?,
            cell.bin_edges(axes[2], bin_width)?,
        ];
        let lengths = axes.map(|a| cell.length(a));
        Ok(Self {
            axes,
            edges,
            lengths,
        })
    }

    pub fn axes(&self) -> [Axis; 3] {
        self.axes
    }

    pub fn edges(&self) -> &[BinEdges; 3] {
        &self.edges
    }

    pub fn shape(&self) -> [usize; 3] {
        [
            self.edges[0].num_bins(),
            self.edges[1].num_bins(),
            self.edges[2].num_bins(),
        ]
    }

    pub fn metadata(&self) -> VolumeMetadata {
        VolumeMetadata {
            lengths: self.lengths,
            edges: self.edges.clone(),
        }
    }

    pub fn histogram(&self, frame: &Frame) -> Histogram3D {
        histogram_3d(
            &frame.positions,
            [&self.edges[0], &self.edges[1], &self.edges[2]],
            self.axes,
        )
    }
}
