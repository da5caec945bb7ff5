//! In-memory window source.

use std::collections::HashMap;

use ndarray::Array2;
use oriel_primitives::{Date, EntityId, Field};
use oriel_traits::{SourceError, WindowSource};

/// An in-memory [`WindowSource`] over a fixed calendar.
///
/// Series are stored per `(field, entity)` and must span the whole calendar,
/// with NaN standing in for days an entity has no data. Windows reaching
/// before the calendar start are padded with NaN rows, and entities without
/// a stored series yield all-NaN columns, so factors see the same
/// missing-value convention everywhere.
#[derive(Debug, Clone)]
pub struct MemorySource {
    calendar: Vec<Date>,
    universe: Vec<EntityId>,
    series: HashMap<Field, HashMap<EntityId, Vec<f64>>>,
}

impl MemorySource {
    /// Create a source over the given trading calendar and fixed universe.
    ///
    /// The calendar is sorted and deduplicated; the universe order is
    /// preserved and defines the column order of every served window.
    #[must_use]
    pub fn new(mut calendar: Vec<Date>, universe: Vec<EntityId>) -> Self {
        calendar.sort_unstable();
        calendar.dedup();
        Self { calendar, universe, series: HashMap::new() }
    }

    /// Store one entity's series for a field, aligned to the calendar.
    ///
    /// # Errors
    /// Returns `SourceError::LengthMismatch` if `values` does not span the
    /// calendar.
    pub fn insert_series(
        &mut self,
        field: impl Into<Field>,
        entity: EntityId,
        values: Vec<f64>,
    ) -> Result<(), SourceError> {
        if values.len() != self.calendar.len() {
            return Err(SourceError::LengthMismatch {
                expected: self.calendar.len(),
                actual: values.len(),
            });
        }
        self.series.entry(field.into()).or_default().insert(entity, values);
        Ok(())
    }

    /// Number of trading dates in the calendar.
    #[must_use]
    pub fn calendar_len(&self) -> usize {
        self.calendar.len()
    }

    fn date_index(&self, date: Date) -> Result<usize, SourceError> {
        self.calendar.binary_search(&date).map_err(|_| SourceError::UnknownDate(date))
    }
}

impl WindowSource for MemorySource {
    fn trading_dates(&self, start: Date, end: Date) -> Result<Vec<Date>, SourceError> {
        Ok(self.calendar.iter().copied().filter(|d| *d >= start && *d <= end).collect())
    }

    fn entities(&self, date: Date) -> Result<Vec<EntityId>, SourceError> {
        self.date_index(date)?;
        Ok(self.universe.clone())
    }

    fn window(
        &self,
        date: Date,
        field: &Field,
        window_length: usize,
        entities: &[EntityId],
    ) -> Result<Array2<f64>, SourceError> {
        let idx = self.date_index(date)?;
        let by_entity =
            self.series.get(field).ok_or_else(|| SourceError::UnknownField(field.clone()))?;

        let mut window = Array2::from_elem((window_length, entities.len()), f64::NAN);
        // Rows available on or before `date`; anything earlier stays NaN.
        let available = (idx + 1).min(window_length);
        let pad = window_length - available;
        let first = idx + 1 - available;

        for (j, entity) in entities.iter().enumerate() {
            if let Some(values) = by_entity.get(entity) {
                for r in 0..available {
                    window[[pad + r, j]] = values[first + r];
                }
            }
        }
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> Date {
        Date::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn sample_source() -> MemorySource {
        let calendar = (1..=5).map(date).collect();
        let universe = vec![EntityId::new(1), EntityId::new(2)];
        let mut source = MemorySource::new(calendar, universe);
        source
            .insert_series(Field::close(), EntityId::new(1), vec![10.0, 11.0, 9.0, 10.0, 10.0])
            .unwrap();
        source
            .insert_series(Field::close(), EntityId::new(2), vec![20.0, 21.0, 22.0, 23.0, 24.0])
            .unwrap();
        source
    }

    #[test]
    fn trading_dates_filters_range() {
        let source = sample_source();
        let dates = source.trading_dates(date(2), date(4)).unwrap();
        assert_eq!(dates, vec![date(2), date(3), date(4)]);
    }

    #[test]
    fn window_is_oldest_to_newest() {
        let source = sample_source();
        let entities = [EntityId::new(1), EntityId::new(2)];
        let window = source.window(date(3), &Field::close(), 3, &entities).unwrap();

        assert_eq!(window.shape(), &[3, 2]);
        assert_eq!(window[[0, 0]], 10.0);
        assert_eq!(window[[2, 0]], 9.0);
        assert_eq!(window[[2, 1]], 22.0);
    }

    #[test]
    fn pre_calendar_rows_are_nan_padded() {
        let source = sample_source();
        let entities = [EntityId::new(1)];
        let window = source.window(date(2), &Field::close(), 4, &entities).unwrap();

        assert!(window[[0, 0]].is_nan());
        assert!(window[[1, 0]].is_nan());
        assert_eq!(window[[2, 0]], 10.0);
        assert_eq!(window[[3, 0]], 11.0);
    }

    #[test]
    fn unknown_entity_column_is_all_nan() {
        let source = sample_source();
        let entities = [EntityId::new(99)];
        let window = source.window(date(5), &Field::close(), 2, &entities).unwrap();
        assert!(window.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn unknown_field_is_an_error() {
        let source = sample_source();
        let err = source.window(date(5), &Field::open(), 2, &[EntityId::new(1)]).unwrap_err();
        assert!(matches!(err, SourceError::UnknownField(_)));
    }

    #[test]
    fn unknown_date_is_an_error() {
        let source = sample_source();
        let err = source.entities(date(9)).unwrap_err();
        assert!(matches!(err, SourceError::UnknownDate(_)));
    }

    #[test]
    fn series_must_span_calendar() {
        let mut source = sample_source();
        let err = source
            .insert_series(Field::open(), EntityId::new(1), vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, SourceError::LengthMismatch { expected: 5, actual: 2 }));
    }
}
