use super::edges::BinEdges;
use crate::core::models::axis::Axis;
use nalgebra::Point3;
use ndarray::{Array2, Array3, Axis as ArrayAxis};

/// Per-bin particle counts aligned with the bins of a [`BinEdges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    pub fn zeros(num_bins: usize) -> Self {
        Self {
            counts: vec![0; num_bins],
        }
    }

    pub fn from_counts(counts: Vec<u64>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Bins scalar positions over `edges`.
pub fn histogram_1d<I>(positions: I, edges: &BinEdges) -> Histogram
where
    I: IntoIterator<Item = f64>,
{
    let mut histogram = Histogram::zeros(edges.num_bins());
    for value in positions {
        if let Some(bin) = edges.bin_index(value) {
            histogram.counts[bin] += 1;
        }
    }
    histogram
}

/// Dense 3-D count array indexed by bins along three axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram3D {
    counts: Array3<u32>,
    axes: [Axis; 3],
}

impl Histogram3D {
    pub fn counts(&self) -> &Array3<u32> {
        &self.counts
    }

    /// The cell axis binned along each array dimension.
    pub fn axes(&self) -> [Axis; 3] {
        self.axes
    }

    pub fn shape(&self) -> [usize; 3] {
        let dim = self.counts.dim();
        [dim.0, dim.1, dim.2]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Counts narrowed to bytes, saturating at 255.
    ///
    /// Returns the narrowed array and the number of bins that had to be clipped.
    pub fn to_bytes(&self) -> (Array3<u8>, usize) {
        let mut clipped = 0;
        let bytes = self.counts.mapv(|c| match u8::try_from(c) {
            Ok(b) => b,
            Err(_) => {
                clipped += 1;
                u8::MAX
            }
        });
        (bytes, clipped)
    }

    /// Mean over one array dimension (0, 1 or 2), giving a 2-D map.
    pub fn mean_projection(&self, dimension: usize) -> Option<Array2<f64>> {
        if dimension > 2 {
            return None;
        }
        self.counts
            .mapv(f64::from)
            .mean_axis(ArrayAxis(dimension))
    }
}

/// Bins points into a 3-D histogram.
///
/// `axes[k]` selects the point coordinate binned over `edges[k]`. A point is counted
/// only if each of its three coordinates falls within the corresponding edges.
pub fn histogram_3d(points: &[Point3<f64>], edges: [&BinEdges; 3], axes: [Axis; 3]) -> Histogram3D {
    let shape = (edges[0].num_bins(), edges[1].num_bins(), edges[2].num_bins());
    let mut counts = Array3::<u32>::zeros(shape);

    for point in points {
        let i = edges[0].bin_index(point[axes[0].index()]);
        let j = edges[1].bin_index(point[axes[1].index()]);
        let k = edges[2].bin_index(point[axes[2].index()]);
        if let (Some(i), Some(j), Some(k)) = (i, j, k) {
            counts[[i, j, k]] += 1;
        }
    }

    Histogram3D { counts, axes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symmetric_edges() -> BinEdges {
        BinEdges::from_values(vec![-4.0, -2.0, 0.0, 2.0, 4.0]).unwrap()
    }

    #[test]
    fn histogram_1d_counts_one_position_per_bin() {
        let hist = histogram_1d([-3.0, -1.0, 1.0, 3.0], &symmetric_edges());
        assert_eq!(hist.counts(), &[1, 1, 1, 1]);
    }

    #[test]
    fn histogram_1d_drops_out_of_range_positions() {
        let positions = [-5.0, -4.0, 0.0, 3.9, 4.0, 10.0, f64::INFINITY];
        let hist = histogram_1d(positions, &symmetric_edges());
        assert_eq!(hist.counts(), &[1, 0, 1, 1]);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn histogram_1d_is_independent_of_input_order() {
        let edges = BinEdges::spanning(0.0, 10.0, 0.7).unwrap();
        let positions: Vec<f64> = (0..200).map(|i| (i as f64 * 0.731) % 11.0 - 0.5).collect();
        let mut reversed = positions.clone();
        reversed.reverse();
        let mut interleaved: Vec<f64> = positions.iter().step_by(2).copied().collect();
        interleaved.extend(positions.iter().skip(1).step_by(2).copied());

        let reference = histogram_1d(positions.iter().copied(), &edges);
        assert_eq!(histogram_1d(reversed, &edges), reference);
        assert_eq!(histogram_1d(interleaved, &edges), reference);
    }

    #[test]
    fn histogram_1d_total_matches_positions_inside_edges() {
        let edges = BinEdges::spanning(-1.0, 4.0, 0.5).unwrap();
        let positions: Vec<f64> = (0..100).map(|i| -3.0 + i as f64 * 0.09).collect();
        let inside = positions
            .iter()
            .filter(|&&p| p >= edges.first() && p < edges.last())
            .count() as u64;
        assert_eq!(histogram_1d(positions, &edges).total(), inside);
    }

    #[test]
    fn histogram_3d_bins_along_the_requested_axes() {
        let ex = BinEdges::from_values(vec![0.0, 1.0, 2.0]).unwrap();
        let ey = BinEdges::from_values(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let ez = BinEdges::from_values(vec![0.0, 2.0]).unwrap();
        let points = vec![
            Point3::new(0.5, 2.5, 1.0),
            Point3::new(1.5, 0.5, 1.0),
            Point3::new(1.5, 0.5, 0.1),
            Point3::new(5.0, 0.5, 1.0),
        ];

        let hist = histogram_3d(&points, [&ex, &ey, &ez], [Axis::X, Axis::Y, Axis::Z]);
        assert_eq!(hist.shape(), [2, 3, 1]);
        assert_eq!(hist.counts()[[0, 2, 0]], 1);
        assert_eq!(hist.counts()[[1, 0, 0]], 2);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn histogram_3d_honours_permuted_axes() {
        let e = BinEdges::from_values(vec![0.0, 1.0, 2.0]).unwrap();
        let points = vec![Point3::new(1.5, 0.5, 0.2)];
        let hist = histogram_3d(&points, [&e, &e, &e], [Axis::Y, Axis::Z, Axis::X]);
        assert_eq!(hist.counts()[[0, 0, 1]], 1);
        assert_eq!(hist.axes(), [Axis::Y, Axis::Z, Axis::X]);
    }

    #[test]
    fn to_bytes_saturates_large_counts() {
        let e = BinEdges::from_values(vec![0.0, 1.0]).unwrap();
        let points = vec![Point3::new(0.5, 0.5, 0.5); 300];
        let hist = histogram_3d(&points, [&e, &e, &e], [Axis::X, Axis::Y, Axis::Z]);
        let (bytes, clipped) = hist.to_bytes();
        assert_eq!(bytes[[0, 0, 0]], 255);
        assert_eq!(clipped, 1);
    }

    #[test]
    fn mean_projection_averages_over_one_dimension() {
        let ex = BinEdges::from_values(vec![0.0, 1.0, 2.0]).unwrap();
        let ez = BinEdges::from_values(vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
        let points = vec![Point3::new(0.5, 0.5, 0.5), Point3::new(0.5, 0.5, 3.5)];
        let hist = histogram_3d(&points, [&ex, &ex, &ez], [Axis::X, Axis::Y, Axis::Z]);

        let map = hist.mean_projection(2).unwrap();
        assert_eq!(map.dim(), (2, 2));
        assert_eq!(map[[0, 0]], 0.5);
        assert_eq!(map[[1, 1]], 0.0);
        assert!(hist.mean_projection(3).is_none());
    }
}
