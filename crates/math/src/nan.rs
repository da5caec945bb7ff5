//! NaN-excluding reductions over 1-d views.

use ndarray::ArrayView1;

/// Number of non-missing (non-NaN) values in the view.
#[must_use]
pub fn nan_count(values: ArrayView1<'_, f64>) -> usize {
    values.iter().filter(|v| !v.is_nan()).count()
}

/// Mean of the non-missing values.
///
/// Returns NaN when every value is missing or the view is empty.
#[must_use]
pub fn nan_mean(values: ArrayView1<'_, f64>) -> f64 {
    let mut n = 0usize;
    let mut sum = 0.0;
    for &v in values.iter() {
        if !v.is_nan() {
            n += 1;
            sum += v;
        }
    }
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

/// Population standard deviation of the non-missing values.
///
/// Divides by the count of non-missing values (not count minus one), so a
/// window of identical values yields exactly 0.0 and a single observation
/// yields 0.0 rather than NaN. Returns NaN when every value is missing.
#[must_use]
pub fn nan_std(values: ArrayView1<'_, f64>) -> f64 {
    let mean = nan_mean(values);
    if mean.is_nan() {
        return f64::NAN;
    }

    let mut n = 0usize;
    let mut sum_sq = 0.0;
    for &v in values.iter() {
        if !v.is_nan() {
            n += 1;
            sum_sq += (v - mean) * (v - mean);
        }
    }
    (sum_sq / n as f64).sqrt()
}
