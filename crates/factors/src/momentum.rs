//! Window-ratio momentum factor.

use ndarray::{ArrayView2, ArrayViewMut1};
use oriel_primitives::{Date, EntityId, Field};
use oriel_traits::{ConfigurableFactor, FactorError, WindowedFactor, validate_invocation};

/// Configuration for the momentum factor.
#[derive(Debug, Clone)]
pub struct MomentumConfig {
    /// Input field the ratio is taken over.
    pub field: Field,
    /// Trailing window length in rows.
    pub window_length: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { field: Field::close(), window_length: 10 }
    }
}

/// Ratio of the newest window row to the oldest.
///
/// Per entity, `window[W-1] / window[0]`. Missing values and zero
/// denominators propagate through IEEE division unmasked: a zero oldest
/// value yields an infinity, NaN on either end yields NaN. This raw
/// propagation is the documented convention for this factor.
#[derive(Debug, Clone)]
pub struct MomentumFactor {
    config: MomentumConfig,
    inputs: [Field; 1],
}

impl MomentumFactor {
    /// Create a new momentum factor with default configuration
    /// (close prices, window of 10).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(MomentumConfig::default())
    }

    /// Create a momentum factor over a custom field and window.
    ///
    /// # Errors
    /// Returns `FactorError` if `window_length` is zero.
    pub fn over(field: Field, window_length: usize) -> Result<Self, FactorError> {
        Self::with_config(MomentumConfig { field, window_length })
    }

    fn from_config(config: MomentumConfig) -> Self {
        let inputs = [config.field.clone()];
        Self { config, inputs }
    }
}

impl Default for MomentumFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurableFactor for MomentumFactor {
    type Config = MomentumConfig;

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

impl WindowedFactor for MomentumFactor {
    fn name(&self) -> &str {
        "momentum"
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

        let window = &inputs[0];
        let oldest = window.row(0);
        let newest = window.row(window.nrows() - 1);
        for ((slot, &new), &old) in out.iter_mut().zip(newest).zip(oldest) {
            *slot = new / old;
        }
        Ok(())
    }
}
