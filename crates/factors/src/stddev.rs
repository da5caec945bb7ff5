//! Trailing standard deviation factor.

use ndarray::{ArrayView2, ArrayViewMut1, Axis};
use oriel_math::nan_std;
use oriel_primitives::{Date, EntityId, Field};
use oriel_traits::{ConfigurableFactor, FactorError, WindowedFactor, validate_invocation};

/// Configuration for the standard deviation factor.
#[derive(Debug, Clone)]
pub struct StdDevConfig {
    /// Input field the deviation is measured over.
    pub field: Field,
    /// Trailing window length in rows.
    pub window_length: usize,
}

impl Default for StdDevConfig {
    fn default() -> Self {
        Self { field: Field::close(), window_length: 5 }
    }
}

/// Trailing standard deviation of one input field.
///
/// Per entity, the population standard deviation of the window (missing
/// values excluded); an all-missing window yields NaN. The population
/// estimator is the documented convention here: a window of identical values
/// scores exactly 0.0.
#[derive(Debug, Clone)]
pub struct StdDevFactor {
    config: StdDevConfig,
    inputs: [Field; 1],
}

impl StdDevFactor {
    /// Create a new standard deviation factor with default configuration
    /// (close prices, window of 5).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(StdDevConfig::default())
    }

    /// Create a standard deviation factor over a custom field and window.
    ///
    /// # Errors
    /// Returns `FactorError` if `window_length` is zero.
    pub fn over(field: Field, window_length: usize) -> Result<Self, FactorError> {
        Self::with_config(StdDevConfig { field, window_length })
    }

    fn from_config(config: StdDevConfig) -> Self {
        let inputs = [config.field.clone()];
        Self { config, inputs }
    }
}

impl Default for StdDevFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurableFactor for StdDevFactor {
    type Config = StdDevConfig;

    fn with_config(config: Self::Config) -> Result<Self, FactorError> {
        if config.window_length == 0 {
            return Err(FactorError::InvalidWindowLength(config.window_length));
        }
        Ok(Self::from_config(config))
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

impl WindowedFactor for StdDevFactor {
    fn name(&self) -> &str {
        "std_dev"
    }

    fn inputs(&self) -> &[Field] {
        &self.inputs
    }

    fn window_length(&self) -> usize {
        self.config.window_length
    }

    fn compute(
        &self,
        _date: Date,
        entities: &[EntityId],
        inputs: &[ArrayView2<'_, f64>],
        mut out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), FactorError> {
        validate_invocation(&self.inputs, self.config.window_length, entities, inputs, out.len())?;

        for (slot, column) in out.iter_mut().zip(inputs[0].axis_iter(Axis(1))) {
            *slot = nan_std(column);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    use super::*;

    fn test_date() -> Date {
        Date::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn default_configuration() {
        let factor = StdDevFactor::new();
        assert_eq!(factor.name(), "std_dev");
        assert_eq!(factor.inputs(), &[Field::close()]);
        assert_eq!(factor.window_length(), 5);
    }

    #[test]
    fn explicit_field_overrides_default() {
        let factor = StdDevFactor::over(Field::volume(), 21).unwrap();
        assert_eq!(factor.inputs(), &[Field::volume()]);
        assert_eq!(factor.window_length(), 21);
    }

    #[test]
    fn zero_window_fails_at_construction() {
        let err = StdDevFactor::over(Field::close(), 0).unwrap_err();
        assert!(matches!(err, FactorError::InvalidWindowLength(0)));
    }

    #[test]
    fn five_day_close_scenario() {
        let factor = StdDevFactor::new();
        let entities = [EntityId::new(1)];
        let window = array![[10.0], [11.0], [9.0], [10.0], [10.0]];
        let mut out = Array1::from_elem(1, f64::NAN);

        factor.compute(test_date(), &entities, &[window.view()], out.view_mut()).unwrap();
        assert_relative_eq!(out[0], 0.6324555320336759, epsilon = 1e-10);
    }

    #[test]
    fn constant_window_scores_zero() {
        let factor = StdDevFactor::over(Field::close(), 3).unwrap();
        let entities = [EntityId::new(1), EntityId::new(2)];
        let window = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let mut out = Array1::from_elem(2, f64::NAN);

        factor.compute(test_date(), &entities, &[window.view()], out.view_mut()).unwrap();
        assert_relative_eq!(out[0], 0.0);
        assert!(out[1] > 0.0);
    }

    #[test]
    fn all_missing_window_scores_nan() {
        let factor = StdDevFactor::over(Field::close(), 2).unwrap();
        let entities = [EntityId::new(1), EntityId::new(2)];
        let window = array![[f64::NAN, 1.0], [f64::NAN, 3.0]];
        let mut out = Array1::from_elem(2, 0.0);

        factor.compute(test_date(), &entities, &[window.view()], out.view_mut()).unwrap();
        assert!(out[0].is_nan());
        assert_relative_eq!(out[1], 1.0);
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let factor = StdDevFactor::new(); // window of 5
        let entities = [EntityId::new(1)];
        let window = array![[10.0], [11.0]]; // only 2 rows
        let mut out = Array1::from_elem(1, f64::NAN);

        let err = factor
            .compute(test_date(), &entities, &[window.view()], out.view_mut())
            .unwrap_err();
        assert!(matches!(err, FactorError::ShapeMismatch { .. }));
    }
}
