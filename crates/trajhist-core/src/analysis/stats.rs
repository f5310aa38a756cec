use super::accumulator::ProfileTable;
use super::asymmetry::asymmetry;
use super::config::RowSelection;
use super::error::AnalysisError;
use crate::core::models::axis::Axis;
use ndarray::{Array2, Axis as ArrayAxis};
use tracing::debug;

/// Averaged profile over a selection of table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats {
    pub axis: Axis,
    /// Bin centers.
    pub x: Vec<f64>,
    /// Mean particle count per bin.
    pub avg_profile: Vec<f64>,
    /// Population standard deviation of the count per bin.
    pub std_profile: Vec<f64>,
    /// Mean number density per bin.
    pub avg_density: Vec<f64>,
    /// Divisor applied to the asymmetry score.
    pub normalization: f64,
    pub rows_used: usize,
}

impl ProfileStats {
    pub fn asymmetry(&self) -> Result<f64, AnalysisError> {
        asymmetry(&self.avg_density, &self.x, self.normalization)
    }
}

/// Reduces a [`ProfileTable`] to mean/std profiles and a number-density profile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsReducer {
    selection: RowSelection,
    reference_density: Option<f64>,
}

impl StatsReducer {
    pub fn new(selection: RowSelection, reference_density: Option<f64>) -> Self {
        Self {
            selection,
            reference_density,
        }
    }

    /// # Errors
    ///
    /// [`AnalysisError::InvalidState`] when the table holds no rows, or when the row
    /// selection picks none of them.
    pub fn reduce(&self, table: &ProfileTable) -> Result<ProfileStats, AnalysisError> {
        if table.is_empty() {
            return Err(AnalysisError::InvalidState(
                "no profile has been accumulated; run the accumulation first".to_string(),
            ));
        }
        let selected = self.selection.rows(table.num_rows());
        if selected.is_empty() {
            return Err(AnalysisError::InvalidState(format!(
                "row selection {:?} picks none of the {} accumulated profile(s)",
                self.selection,
                table.num_rows()
            )));
        }

        let bins = table.edges().num_bins();
        let counts = Array2::from_shape_fn((selected.len(), bins), |(r, b)| {
            table.rows()[selected[r]].counts()[b] as f64
        });
        let avg_profile = counts
            .mean_axis(ArrayAxis(0))
            .ok_or_else(|| AnalysisError::InvalidState("no rows to average".to_string()))?
            .to_vec();
        let std_profile = counts.std_axis(ArrayAxis(0), 0.0).to_vec();

        let axis = table.axis();
        let bin_volume = table.edges().width() * table.cell().cross_section(axis);
        let avg_density = avg_profile.iter().map(|v| v / bin_volume).collect();

        let normalization = match self.reference_density {
            Some(reference) => (table.bulk_density() - reference) * table.cell().length(axis),
            None => 1.0,
        };
        debug!(
            "Reduced {} row(s); bin volume {}, normalization {}",
            selected.len(),
            bin_volume,
            normalization
        );

        Ok(ProfileStats {
            axis,
            x: table.centers(),
            avg_profile,
            std_profile,
            avg_density,
            normalization,
            rows_used: selected.len(),
        })
    }
}
