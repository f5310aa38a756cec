use super::axis::Axis;
use crate::core::binning::edges::BinEdges;
use crate::core::binning::error::BinningError;
use nalgebra::Vector3;

/// Simulation box approximated as axis-aligned: an origin and an edge length per axis.
///
/// Triclinic boxes are reduced to their diagonal lengths; tilt factors are not
/// considered when binning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationCell {
    origin: Vector3<f64>,
    lengths: Vector3<f64>,
}

impl SimulationCell {
    pub fn new(origin: Vector3<f64>, lengths: Vector3<f64>) -> Self {
        Self { origin, lengths }
    }

    /// Builds a cell from per-axis `(lo, hi)` bounds.
    pub fn from_bounds(bounds: [(f64, f64); 3]) -> Self {
        let origin = Vector3::new(bounds[0].0, bounds[1].0, bounds[2].0);
        let lengths = Vector3::new(
            bounds[0].1 - bounds[0].0,
            bounds[1].1 - bounds[1].0,
            bounds[2].1 - bounds[2].0,
        );
        Self { origin, lengths }
    }

    #[inline]
    pub fn origin(&self, axis: Axis) -> f64 {
        self.origin[axis.index()]
    }

    #[inline]
    pub fn length(&self, axis: Axis) -> f64 {
        self.lengths[axis.index()]
    }

    pub fn origins(&self) -> &Vector3<f64> {
        &self.origin
    }

    pub fn lengths(&self) -> &Vector3<f64> {
        &self.lengths
    }

    pub fn volume(&self) -> f64 {
        self.lengths.x * self.lengths.y * self.lengths.z
    }

    /// Area of the face orthogonal to `axis`.
    pub fn cross_section(&self, axis: Axis) -> f64 {
        let [a, b] = axis.others();
        self.length(a) * self.length(b)
    }

    /// Bin edges spanning the cell along `axis` plus one bin of margin.
    pub fn bin_edges(&self, axis: Axis, width: f64) -> Result<BinEdges, BinningError> {
        BinEdges::spanning(self.origin(axis), self.length(axis), width)
    }
}
