//! Windowed factor trait definitions.

use ndarray::{ArrayView2, ArrayViewMut1};
use oriel_primitives::{Date, EntityId, EntityMask, Field};

/// Errors that can occur when defining or invoking a factor.
#[derive(Debug, thiserror::Error)]
pub enum FactorError {
    /// Window length must be at least one row.
    #[error("invalid window length: {0} (must be at least 1)")]
    InvalidWindowLength(usize),

    /// A factor must declare at least one input field.
    #[error("no input fields declared")]
    NoInputFields,

    /// Number of supplied input arrays does not match the declaration.
    #[error("input count mismatch: {declared} fields declared, {supplied} arrays supplied")]
    InputCountMismatch {
        /// Number of declared input fields.
        declared: usize,
        /// Number of supplied input arrays.
        supplied: usize,
    },

    /// An input array does not have the declared (window, entities) shape.
    #[error(
        "shape mismatch for input '{field}': expected {expected_rows}x{expected_cols}, \
         got {rows}x{cols}"
    )]
    ShapeMismatch {
        /// Field whose array is misshapen.
        field: Field,
        /// Declared window length.
        expected_rows: usize,
        /// Entity count of this invocation.
        expected_cols: usize,
        /// Actual row count.
        rows: usize,
        /// Actual column count.
        cols: usize,
    },

    /// Output length does not match the entity count.
    #[error("output length mismatch: expected {expected}, got {actual}")]
    OutputLengthMismatch {
        /// Entity count of this invocation.
        expected: usize,
        /// Actual output length.
        actual: usize,
    },
}

/// A factor computed from trailing windows of per-entity columnar data.
///
/// Implementations are pure: they hold no mutable state, and identical inputs
/// produce identical outputs regardless of invocation order. The output view
/// is the sole result channel; a correct implementation writes every slot
/// (a value or NaN), never reads or writes out of bounds, and never reorders
/// the entity axis.
///
/// Per-entity data insufficiency is expressed by writing NaN at that entity's
/// slot. `Err` is reserved for engine-side contract violations (mismatched
/// shapes), never for missing data.
pub trait WindowedFactor: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this factor; also the output column name.
    fn name(&self) -> &str;

    /// Input fields, in the order the engine must supply their windows.
    fn inputs(&self) -> &[Field];

    /// Number of trailing rows in each input window.
    fn window_length(&self) -> usize;

    /// Optional entity-subset mask. Entities outside the mask receive NaN.
    fn mask(&self) -> Option<&EntityMask> {
        None
    }

    /// Compute one value per entity for a single evaluation date.
    ///
    /// # Arguments
    /// * `date` - Evaluation date (informational only)
    /// * `entities` - Entity sequence of length N, aligning all columns
    /// * `inputs` - One `(window_length, N)` array per declared field
    /// * `out` - Pre-allocated output of length N
    ///
    /// # Errors
    /// Returns `FactorError` if the supplied arrays violate the declared
    /// shapes.
    fn compute(
        &self,
        date: Date,
        entities: &[EntityId],
        inputs: &[ArrayView2<'_, f64>],
        out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), FactorError>;
}

impl<T: WindowedFactor + ?Sized> WindowedFactor for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn inputs(&self) -> &[Field] {
        (**self).inputs()
    }

    fn window_length(&self) -> usize {
        (**self).window_length()
    }

    fn mask(&self) -> Option<&EntityMask> {
        (**self).mask()
    }

    fn compute(
        &self,
        date: Date,
        entities: &[EntityId],
        inputs: &[ArrayView2<'_, f64>],
        out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), FactorError> {
        (**self).compute(date, entities, inputs, out)
    }
}

/// A factor that supports runtime configuration.
///
/// Explicit configuration passed to `with_config` takes precedence over the
/// type's `Default` for the whole lifetime of the instance.
pub trait ConfigurableFactor: WindowedFactor + Sized {
    /// Configuration type for this factor.
    type Config: Default + Clone + Send + Sync + std::fmt::Debug;

    /// Create a new factor with the given configuration.
    ///
    /// # Errors
    /// Returns `FactorError` if the configuration is malformed (window
    /// length of zero, empty input-field list).
    fn with_config(config: Self::Config) -> Result<Self, FactorError>;

    /// Returns the current configuration.
    fn config(&self) -> &Self::Config;
}

/// Validate a factor definition at construction time.
///
/// # Errors
/// Returns `FactorError` if `window_length` is zero or `inputs` is empty.
pub fn validate_definition(inputs: &[Field], window_length: usize) -> Result<(), FactorError> {
    if window_length == 0 {
        return Err(FactorError::InvalidWindowLength(window_length));
    }
    if inputs.is_empty() {
        return Err(FactorError::NoInputFields);
    }
    Ok(())
}

/// Validate one invocation's arrays against a factor's declaration.
///
/// # Errors
/// Returns `FactorError` if the array count, any array shape, or the output
/// length disagrees with the declaration.
pub fn validate_invocation(
    declared: &[Field],
    window_length: usize,
    entities: &[EntityId],
    inputs: &[ArrayView2<'_, f64>],
    out_len: usize,
) -> Result<(), FactorError> {
    if inputs.len() != declared.len() {
        return Err(FactorError::InputCountMismatch {
            declared: declared.len(),
            supplied: inputs.len(),
        });
    }
    if out_len != entities.len() {
        return Err(FactorError::OutputLengthMismatch {
            expected: entities.len(),
            actual: out_len,
        });
    }
    for (field, arr) in declared.iter().zip(inputs) {
        if arr.nrows() != window_length || arr.ncols() != entities.len() {
            return Err(FactorError::ShapeMismatch {
                field: field.clone(),
                expected_rows: window_length,
                expected_cols: entities.len(),
                rows: arr.nrows(),
                cols: arr.ncols(),
            });
        }
    }
    Ok(())
}

/// Adapts a plain closure to the [`WindowedFactor`] contract.
///
/// This is the composition-first way to define one-off factors without a
/// dedicated type:
///
/// ```
/// use oriel_primitives::Field;
/// use oriel_traits::FnFactor;
///
/// let last_close = FnFactor::new("last_close", vec![Field::close()], 1, |_, _, inputs, mut out| {
///     out.assign(&inputs[0].row(0));
///     Ok(())
/// })
/// .unwrap();
/// ```
pub struct FnFactor<F> {
    name: String,
    inputs: Vec<Field>,
    window_length: usize,
    mask: Option<EntityMask>,
    compute_fn: F,
}

impl<F> FnFactor<F>
where
    F: Fn(
            Date,
            &[EntityId],
            &[ArrayView2<'_, f64>],
            ArrayViewMut1<'_, f64>,
        ) -> Result<(), FactorError>
        + Send
        + Sync,
{
    /// Create a new closure-backed factor.
    ///
    /// # Errors
    /// Returns `FactorError` if the window length is zero or no input fields
    /// are declared.
    pub fn new(
        name: impl Into<String>,
        inputs: Vec<Field>,
        window_length: usize,
        compute_fn: F,
    ) -> Result<Self, FactorError> {
        validate_definition(&inputs, window_length)?;
        Ok(Self { name: name.into(), inputs, window_length, mask: None, compute_fn })
    }

    /// Restrict this factor to a subset of entities.
    #[must_use]
    pub fn with_mask(mut self, mask: EntityMask) -> Self {
        self.mask = Some(mask);
        self
    }
}

impl<F> std::fmt::Debug for FnFactor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFactor")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("window_length", &self.window_length)
            .field("mask", &self.mask)
            .finish_non_exhaustive()
    }
}

impl<F> WindowedFactor for FnFactor<F>
where
    F: Fn(
            Date,
            &[EntityId],
            &[ArrayView2<'_, f64>],
            ArrayViewMut1<'_, f64>,
        ) -> Result<(), FactorError>
        + Send
        + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &[Field] {
        &self.inputs
    }

    fn window_length(&self) -> usize {
        self.window_length
    }

    fn mask(&self) -> Option<&EntityMask> {
        self.mask.as_ref()
    }

    fn compute(
        &self,
        date: Date,
        entities: &[EntityId],
        inputs: &[ArrayView2<'_, f64>],
        out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), FactorError> {
        validate_invocation(&self.inputs, self.window_length, entities, inputs, out.len())?;
        (self.compute_fn)(date, entities, inputs, out)
    }
}

/// Composes an entity-subset mask onto an existing factor.
///
/// The inner factor is unchanged; the hosting engine consults [`mask`] and
/// writes NaN for non-member entities after the inner computation.
///
/// [`mask`]: WindowedFactor::mask
#[derive(Debug)]
pub struct Masked<T> {
    inner: T,
    mask: EntityMask,
}

impl<T: WindowedFactor> Masked<T> {
    /// Wrap `inner` with the given mask.
    pub const fn new(inner: T, mask: EntityMask) -> Self {
        Self { inner, mask }
    }

    /// Returns the wrapped factor.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: WindowedFactor> WindowedFactor for Masked<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn inputs(&self) -> &[Field] {
        self.inner.inputs()
    }

    fn window_length(&self) -> usize {
        self.inner.window_length()
    }

    fn mask(&self) -> Option<&EntityMask> {
        Some(&self.mask)
    }

    fn compute(
        &self,
        date: Date,
        entities: &[EntityId],
        inputs: &[ArrayView2<'_, f64>],
        out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), FactorError> {
        self.inner.compute(date, entities, inputs, out)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, array};

    use super::*;

    fn test_date() -> Date {
        Date::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn last_row_factor() -> impl WindowedFactor {
        FnFactor::new("last", vec![Field::close()], 2, |_, _, inputs, mut out| {
            out.assign(&inputs[0].row(inputs[0].nrows() - 1));
            Ok(())
        })
        .unwrap()
    }

    #[test]
    fn definition_rejects_zero_window() {
        let err = validate_definition(&[Field::close()], 0).unwrap_err();
        assert!(matches!(err, FactorError::InvalidWindowLength(0)));
    }

    #[test]
    fn definition_rejects_empty_inputs() {
        let err = validate_definition(&[], 5).unwrap_err();
        assert!(matches!(err, FactorError::NoInputFields));
    }

    #[test]
    fn invocation_rejects_wrong_shape() {
        let entities = [EntityId::new(1), EntityId::new(2)];
        let window = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let err = validate_invocation(
            &[Field::close()],
            2, // declared window is 2, array has 3 rows
            &entities,
            &[window.view()],
            entities.len(),
        )
        .unwrap_err();
        assert!(matches!(err, FactorError::ShapeMismatch { rows: 3, .. }));
    }

    #[test]
    fn invocation_rejects_input_count_mismatch() {
        let entities = [EntityId::new(1)];
        let err =
            validate_invocation(&[Field::close(), Field::open()], 2, &entities, &[], 1)
                .unwrap_err();
        assert!(matches!(err, FactorError::InputCountMismatch { declared: 2, supplied: 0 }));
    }

    #[test]
    fn fn_factor_computes_through_closure() {
        let factor = last_row_factor();
        let entities = [EntityId::new(1), EntityId::new(2)];
        let window = array![[1.0, 2.0], [3.0, 4.0]];
        let mut out = Array1::from_elem(2, f64::NAN);

        factor.compute(test_date(), &entities, &[window.view()], out.view_mut()).unwrap();
        assert_eq!(out, array![3.0, 4.0]);
    }

    #[test]
    fn fn_factor_rejects_bad_definition() {
        let result = FnFactor::new("bad", vec![], 5, |_, _, _, _| Ok(()));
        assert!(matches!(result.unwrap_err(), FactorError::NoInputFields));
    }

    #[test]
    fn masked_delegates_and_exposes_mask() {
        let mask: EntityMask = [EntityId::new(1)].into_iter().collect();
        let factor = Masked::new(last_row_factor(), mask);

        assert_eq!(factor.name(), "last");
        assert_eq!(factor.window_length(), 2);
        assert!(factor.mask().unwrap().contains(EntityId::new(1)));
        assert!(!factor.mask().unwrap().contains(EntityId::new(2)));
    }

    #[test]
    fn boxed_factor_is_a_factor() {
        let boxed: Box<dyn WindowedFactor> = Box::new(last_row_factor());
        let entities = [EntityId::new(7)];
        let window = array![[10.0], [20.0]];
        let mut out = Array1::from_elem(1, f64::NAN);

        boxed.compute(test_date(), &entities, &[window.view()], out.view_mut()).unwrap();
        assert_eq!(out[0], 20.0);
    }

    #[test]
    fn determinism_identical_inputs_identical_outputs() {
        let factor = last_row_factor();
        let entities = [EntityId::new(1), EntityId::new(2)];
        let window = array![[1.0, f64::NAN], [3.5, 4.5]];

        let mut first = Array1::from_elem(2, f64::NAN);
        let mut second = Array1::from_elem(2, f64::NAN);
        factor.compute(test_date(), &entities, &[window.view()], first.view_mut()).unwrap();
        factor.compute(test_date(), &entities, &[window.view()], second.view_mut()).unwrap();

        assert_eq!(first, second);
    }
}
