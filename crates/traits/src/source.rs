//! Engine boundary trait definitions.

use ndarray::Array2;
use oriel_primitives::{Date, EntityId, Field};

/// Errors that can occur while serving window data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested date is not a trading date of this source.
    #[error("unknown trading date: {0}")]
    UnknownDate(Date),

    /// The requested field is not served by this source.
    #[error("unknown field: {0}")]
    UnknownField(Field),

    /// A series does not span the source calendar.
    #[error("series length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Calendar length of the source.
        expected: usize,
        /// Supplied series length.
        actual: usize,
    },
}

/// The narrow boundary behind which the hosting engine lives.
///
/// A source answers three questions: which dates trade in a range, which
/// entities make up the universe on a date, and what the trailing window of a
/// field looks like on that date. Everything else about the engine (storage,
/// scheduling, universe construction) stays on the far side of this trait.
pub trait WindowSource: Send + Sync {
    /// Trading dates within `[start, end]`, oldest first.
    ///
    /// # Errors
    /// Returns `SourceError` if the range cannot be resolved.
    fn trading_dates(&self, start: Date, end: Date) -> Result<Vec<Date>, SourceError>;

    /// The entity universe for one date, in the order all columns align to.
    ///
    /// # Errors
    /// Returns `SourceError::UnknownDate` if `date` is not a trading date.
    fn entities(&self, date: Date) -> Result<Vec<EntityId>, SourceError>;

    /// Trailing window of `field` ending at `date`, shaped
    /// `(window_length, entities.len())`, rows oldest to newest.
    ///
    /// Entities lacking data on some rows carry NaN there; rows reaching
    /// before recorded history are entirely NaN.
    ///
    /// # Errors
    /// Returns `SourceError` if `date` or `field` is unknown.
    fn window(
        &self,
        date: Date,
        field: &Field,
        window_length: usize,
        entities: &[EntityId],
    ) -> Result<Array2<f64>, SourceError>;
}
