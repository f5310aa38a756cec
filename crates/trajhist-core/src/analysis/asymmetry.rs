use super::error::AnalysisError;

/// Trapezoidal-rule integral of `y` over the sample points `x`.
///
/// Fewer than two samples integrate to zero.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(y, x)| 0.5 * (y[0] + y[1]) * (x[1] - x[0]))
        .sum()
}

/// Imbalance between the positive and negative halves of a density profile.
///
/// The samples with `x > 0` and those with `x < 0` are integrated separately, each over
/// its own coordinates; samples at exactly `x == 0` belong to neither side. The score is
/// `|I+ - I-| / normalization`.
///
/// # Errors
///
/// Returns [`AnalysisError::Domain`] if `rho` and `x` differ in length or if
/// `normalization` is zero or not finite.
pub fn asymmetry(rho: &[f64], x: &[f64], normalization: f64) -> Result<f64, AnalysisError> {
    if rho.len() != x.len() {
        return Err(AnalysisError::Domain(format!(
            "density has {} samples but coordinates have {}",
            rho.len(),
            x.len()
        )));
    }
    if normalization == 0.0 || !normalization.is_finite() {
        return Err(AnalysisError::Domain(format!(
            "asymmetry normalization must be finite and non-zero, got {}",
            normalization
        )));
    }

    let side = |keep: fn(f64) -> bool| -> f64 {
        let (r, c): (Vec<f64>, Vec<f64>) = rho
            .iter()
            .zip(x)
            .filter(|&(_, &xi)| keep(xi))
            .map(|(&r, &c)| (r, c))
            .unzip();
        trapezoid(&r, &c)
    };

    let positive = side(|xi| xi > 0.0);
    let negative = side(|xi| xi < 0.0);
    Ok((positive - negative).abs() / normalization)
}
