//! Mean difference factor.

use ndarray::{ArrayView2, ArrayViewMut1};
use oriel_math::nan_mean;
use oriel_primitives::{Date, EntityId, Field};
use oriel_traits::{ConfigurableFactor, FactorError, WindowedFactor, validate_invocation};

/// Configuration for the mean difference factor.
#[derive(Debug, Clone)]
pub struct MeanDifferenceConfig {
    /// Field the difference is taken from.
    pub minuend: Field,
    /// Field subtracted from the minuend.
    pub subtrahend: Field,
    /// Trailing window length in rows.
    pub window_length: usize,
}

impl Default for MeanDifferenceConfig {
    fn default() -> Self {
        Self { minuend: Field::close(), subtrahend: Field::open(), window_length: 10 }
    }
}

/// Mean of the elementwise difference between two input fields.
///
/// Per entity, `minuend - subtrahend` row by row across the window, then the
/// mean over the window axis. Rows where either side is missing drop out of
/// the mean; if no row survives, the entity scores NaN. Defaults to the mean
/// close-over-open gap across ten rows.
#[derive(Debug, Clone)]
pub struct MeanDifferenceFactor {
    config: MeanDifferenceConfig,
    inputs: [Field; 2],
}

impl MeanDifferenceFactor {
    /// Create a new mean difference factor with default configuration
    /// (close minus open, window of 10).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(MeanDifferenceConfig::default())
    }

    /// Create a mean difference factor between two custom fields.
    ///
    /// # Errors
    /// Returns `FactorError` if `window_length` is zero.
    pub fn between(
        minuend: Field,
        subtrahend: Field,
        window_length: usize,
    ) -> Result<Self, FactorError> {
        Self::with_config(MeanDifferenceConfig { minuend, subtrahend, window_length })
    }

    fn from_config(config: MeanDifferenceConfig) -> Self {
        let inputs = [config.minuend.clone(), config.subtrahend.clone()];
        Self { config, inputs }
    }
}

impl Default for MeanDifferenceFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurableFactor for MeanDifferenceFactor {
    type Config = MeanDifferenceConfig;

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

impl WindowedFactor for MeanDifferenceFactor {
    fn name(&self) -> &str {
        "mean_difference"
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

        for (j, slot) in out.iter_mut().enumerate() {
            // Subtraction propagates NaN, so a row missing on either side
            // drops out of the mean.
            let diff = &inputs[0].column(j) - &inputs[1].column(j);
            *slot = nan_mean(diff.view());
        }
        Ok(())
    }
}
