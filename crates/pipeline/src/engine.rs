//! Pipeline driver: per-date factor evaluation and table assembly.

use std::collections::HashSet;

use ndarray::{Array1, ArrayView2};
use oriel_primitives::{Date, EntityId, FactorName};
use oriel_traits::{WindowSource, WindowedFactor, validate_invocation};
use polars::prelude::*;

use crate::PipelineError;

/// Drives a set of windowed factors across a date range.
///
/// For each trading date the pipeline fetches the universe and the trailing
/// windows each factor declares, invokes the factor, applies its mask, and
/// collects the outputs into one table: a row per surviving `(date, entity)`
/// pair and a column per factor. An optional screen factor decides survival:
/// an entity is kept iff the screen output is finite and positive.
#[derive(Debug, Default)]
pub struct Pipeline {
    factors: Vec<(FactorName, Box<dyn WindowedFactor>)>,
    screen: Option<Box<dyn WindowedFactor>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factor. Its name becomes a column of the output table.
    #[must_use]
    pub fn add_factor(mut self, factor: impl WindowedFactor + 'static) -> Self {
        let name = FactorName::from(factor.name());
        self.factors.push((name, Box::new(factor)));
        self
    }

    /// Register a screen. Entities scoring a non-finite or non-positive
    /// value on a date are dropped from that date's rows.
    #[must_use]
    pub fn with_screen(mut self, screen: impl WindowedFactor + 'static) -> Self {
        self.screen = Some(Box::new(screen));
        self
    }

    /// Run every registered factor over `[start, end]`.
    ///
    /// Returns a `DataFrame` with columns `date` (ISO string), `entity`
    /// (u64), and one `f64` column per factor, sorted by date then entity.
    ///
    /// # Errors
    /// Returns `PipelineError` if no factors are registered, factor names
    /// collide, the source fails, or a factor reports a contract violation.
    pub fn run(
        &self,
        source: &dyn WindowSource,
        start: Date,
        end: Date,
    ) -> Result<DataFrame, PipelineError> {
        if self.factors.is_empty() {
            return Err(PipelineError::NoFactors);
        }
        let mut seen = HashSet::new();
        for (name, _) in &self.factors {
            if !seen.insert(name) {
                return Err(PipelineError::DuplicateFactor(name.clone()));
            }
        }

        let mut date_col: Vec<String> = Vec::new();
        let mut entity_col: Vec<u64> = Vec::new();
        let mut factor_cols: Vec<Vec<f64>> = vec![Vec::new(); self.factors.len()];

        for date in source.trading_dates(start, end)? {
            let universe = source.entities(date)?;
            if universe.is_empty() {
                continue;
            }

            let mut outputs = Vec::with_capacity(self.factors.len());
            for (_, factor) in &self.factors {
                outputs.push(evaluate(factor.as_ref(), source, date, &universe)?);
            }

            let keep: Vec<bool> = match &self.screen {
                Some(screen) => evaluate(screen.as_ref(), source, date, &universe)?
                    .iter()
                    .map(|v| v.is_finite() && *v > 0.0)
                    .collect(),
                None => vec![true; universe.len()],
            };

            for (i, entity) in universe.iter().enumerate() {
                if !keep[i] {
                    continue;
                }
                date_col.push(date.to_string());
                entity_col.push(entity.0);
                for (col, output) in factor_cols.iter_mut().zip(&outputs) {
                    col.push(output[i]);
                }
            }
        }

        let mut columns = vec![
            Column::new("date".into(), date_col),
            Column::new("entity".into(), entity_col),
        ];
        for ((name, _), values) in self.factors.iter().zip(factor_cols) {
            columns.push(Column::new(name.as_str().into(), values));
        }

        let table = DataFrame::new(columns)?
            .lazy()
            .sort(["date", "entity"], SortMultipleOptions::default())
            .collect()?;
        Ok(table)
    }
}

/// Evaluate one factor for one date: fetch windows, validate, compute,
/// apply the factor's mask.
fn evaluate(
    factor: &dyn WindowedFactor,
    source: &dyn WindowSource,
    date: Date,
    universe: &[EntityId],
) -> Result<Array1<f64>, PipelineError> {
    let mut windows = Vec::with_capacity(factor.inputs().len());
    for field in factor.inputs() {
        windows.push(source.window(date, field, factor.window_length(), universe)?);
    }
    let views: Vec<ArrayView2<'_, f64>> = windows.iter().map(|w| w.view()).collect();

    let mut out = Array1::from_elem(universe.len(), f64::NAN);
    validate_invocation(factor.inputs(), factor.window_length(), universe, &views, out.len())?;
    factor.compute(date, universe, &views, out.view_mut())?;

    if let Some(mask) = factor.mask() {
        for (slot, entity) in out.iter_mut().zip(universe) {
            if !mask.contains(*entity) {
                *slot = f64::NAN;
            }
        }
    }
    Ok(out)
}
