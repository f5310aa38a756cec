use super::error::BinningError;

const SPACING_TOLERANCE: f64 = 1e-9;

/// Strictly increasing, evenly spaced bin boundaries along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
    width: f64,
}

impl BinEdges {
    /// Edges from `origin` to `origin + extent` with one extra bin of margin.
    ///
    /// Follows half-open `arange(origin, origin + extent + width, width)`: the number of
    /// edges is `ceil((extent + width) / width)` and edge `i` is `origin + i * width`.
    pub fn spanning(origin: f64, extent: f64, width: f64) -> Result<Self, BinningError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(BinningError::InvalidWidth(width));
        }
        if !(extent.is_finite() && extent > 0.0) {
            return Err(BinningError::InvalidExtent(extent));
        }

        let count = ((extent + width) / width).ceil() as usize;
        let edges: Vec<f64> = (0..count).map(|i| origin + i as f64 * width).collect();
        if edges.len() < 2 {
            return Err(BinningError::TooFewEdges(edges.len()));
        }
        Ok(Self { edges, width })
    }

    /// Wraps explicit edge values after validating ordering and even spacing.
    pub fn from_values(edges: Vec<f64>) -> Result<Self, BinningError> {
        if edges.len() < 2 {
            return Err(BinningError::TooFewEdges(edges.len()));
        }
        let width = edges[1] - edges[0];
        for (index, pair) in edges.windows(2).enumerate() {
            let gap = pair[1] - pair[0];
            if !(gap > 0.0) {
                return Err(BinningError::NotIncreasing {
                    index: index + 1,
                    value: pair[1],
                });
            }
            if (gap - width).abs() > SPACING_TOLERANCE * width.abs().max(1.0) {
                return Err(BinningError::UnevenSpacing {
                    index,
                    gap,
                    expected: width,
                });
            }
        }
        Ok(Self { edges, width })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn num_bins(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn first(&self) -> f64 {
        self.edges[0]
    }

    pub fn last(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Bin midpoints, one per bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges[..self.edges.len() - 1]
            .iter()
            .map(|e| e + self.width / 2.0)
            .collect()
    }

    /// Index of the bin containing `value`, or `None` when it falls outside the edges.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.first() || value >= self.last() {
            return None;
        }
        let last_bin = self.num_bins() - 1;
        let mut idx = (((value - self.first()) / self.width).floor() as usize).min(last_bin);

        // The arithmetic guess can be off by one where an edge carries rounding error.
        while idx > 0 && value < self.edges[idx] {
            idx -= 1;
        }
        while idx < last_bin && value >= self.edges[idx + 1] {
            idx += 1;
        }
        Some(idx)
    }
}
