//! Small summary statistics with numpy semantics
//!
//! [`mean`] lets NaN and infinities propagate; [`nan_mean`] drops NaN only.
//! Both return NaN for an empty input.

/// Arithmetic mean of all values.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Arithmetic mean of the values which are not NaN.
///
/// Infinite values are kept, matching `np.mean(y[~np.isnan(y)])`.
pub fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|value| !value.is_nan())
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Number of values which are NaN or infinite.
pub fn count_non_finite(values: &[f64]) -> usize {
    values.iter().filter(|value| !value.is_finite()).count()
}
