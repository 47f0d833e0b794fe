//! Turns descending source series into ascending, index-aligned plot series.

use ndvi_common::{AlignedSeries, Entity, MeasurementRecord, NdviError, Result};

/// Aligns one entity's measurements with the shared external series.
///
/// Both inputs arrive newest first. The aligner only reverses them; it never
/// re-sorts by timestamp and never touches values.
pub struct SeriesAligner;

impl SeriesAligner {
    /// Reverses both series into chronological order and pairs them by position.
    ///
    /// # Errors
    ///
    /// Returns [`NdviError::MismatchedSeriesLength`] when the series lengths
    /// differ, since pairing them by position would put values against the
    /// wrong dates.
    pub fn align(
        entity_measurements: &[MeasurementRecord],
        external_measurements: &[MeasurementRecord],
    ) -> Result<AlignedSeries> {
        if entity_measurements.len() != external_measurements.len() {
            return Err(NdviError::mismatched_lengths(
                entity_measurements.len(),
                external_measurements.len(),
            ));
        }

        let labels = entity_measurements
            .iter()
            .rev()
            .map(|record| record.date.clone())
            .collect();
        let primary = entity_measurements
            .iter()
            .rev()
            .map(|record| record.value)
            .collect();
        let secondary = external_measurements
            .iter()
            .rev()
            .map(|record| record.value)
            .collect();

        Ok(AlignedSeries {
            labels,
            primary,
            secondary,
        })
    }

    /// Resolves the entity at `index` and aligns it with `external_measurements`.
    ///
    /// # Errors
    ///
    /// Returns [`NdviError::IndexOutOfRange`] for an index outside the
    /// collection, or any error from [`SeriesAligner::align`].
    pub fn align_entity(
        entities: &[Entity],
        index: usize,
        external_measurements: &[MeasurementRecord],
    ) -> Result<AlignedSeries> {
        let entity = entities
            .get(index)
            .ok_or_else(|| NdviError::index_out_of_range(index, entities.len()))?;
        Self::align(&entity.records, external_measurements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndvi_common::test_utils::{records, series_fixtures};
    use ndvi_common::Timestamp;

    fn labels(raw: &[&str]) -> Vec<Timestamp> {
        raw.iter().copied().map(Timestamp::from).collect()
    }

    #[test]
    fn test_align_reverses_into_ascending_order() {
        let aligned = SeriesAligner::align(
            &series_fixtures::descending_entity(),
            &series_fixtures::descending_external(),
        )
        .unwrap();

        assert_eq!(aligned.labels, labels(&["1", "2", "3"]));
        assert_eq!(aligned.primary, vec![0.3, 0.4, 0.5]);
        assert_eq!(aligned.secondary, vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_align_empty_series() {
        let aligned = SeriesAligner::align(&[], &[]).unwrap();
        assert!(aligned.is_empty());
        assert!(aligned.primary.is_empty());
        assert!(aligned.secondary.is_empty());
    }

    #[test]
    fn test_align_rejects_mismatched_lengths() {
        let entity = records(&[("3", 0.5), ("2", 0.4), ("1", 0.3)]);
        let external = records(&[("4", 0.1), ("3", 1.0), ("2", 0.0), ("1", 2.0)]);

        let err = SeriesAligner::align(&entity, &external).unwrap_err();
        assert!(matches!(
            err,
            NdviError::MismatchedSeriesLength {
                entity: 3,
                external: 4
            }
        ));
    }

    #[test]
    fn test_align_does_not_sort_by_timestamp() {
        // Out-of-order input is reversed as-is.
        let entity = records(&[("a", 1.0), ("c", 3.0), ("b", 2.0)]);
        let external = records(&[("a", 0.0), ("c", 0.0), ("b", 0.0)]);

        let aligned = SeriesAligner::align(&entity, &external).unwrap();
        assert_eq!(aligned.labels, labels(&["b", "c", "a"]));
        assert_eq!(aligned.primary, vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_align_entity_by_index() {
        let entities = series_fixtures::three_fields();
        let external = series_fixtures::descending_external();

        let aligned = SeriesAligner::align_entity(&entities, 1, &external).unwrap();
        assert_eq!(aligned.primary, vec![0.2, 0.6, 0.7]);
    }

    #[test]
    fn test_align_entity_out_of_range() {
        let entities = series_fixtures::three_fields();
        let err = SeriesAligner::align_entity(&entities, 3, &[]).unwrap_err();
        assert!(matches!(err, NdviError::IndexOutOfRange { index: 3, count: 3 }));
    }

    mod property_tests {
        use super::*;
        use ndvi_common::test_utils::property_testing::paired_series_strategy;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_property_lengths_and_positions((entity, external) in paired_series_strategy(48)) {
                let aligned = SeriesAligner::align(&entity, &external).unwrap();
                let len = entity.len();

                prop_assert_eq!(aligned.labels.len(), len);
                prop_assert_eq!(aligned.primary.len(), len);
                prop_assert_eq!(aligned.secondary.len(), len);
                for i in 0..len {
                    prop_assert_eq!(&aligned.labels[i], &entity[len - 1 - i].date);
                    prop_assert_eq!(aligned.primary[i], entity[len - 1 - i].value);
                    prop_assert_eq!(aligned.secondary[i], external[len - 1 - i].value);
                }
            }

            #[test]
            fn test_property_realigning_output_restores_input_order((entity, external) in paired_series_strategy(48)) {
                let first = SeriesAligner::align(&entity, &external).unwrap();

                let ascending_entity: Vec<MeasurementRecord> = first
                    .labels
                    .iter()
                    .zip(&first.primary)
                    .map(|(date, value)| MeasurementRecord::new(date.clone(), *value))
                    .collect();
                let ascending_external: Vec<MeasurementRecord> = first
                    .labels
                    .iter()
                    .zip(&first.secondary)
                    .map(|(date, value)| MeasurementRecord::new(date.clone(), *value))
                    .collect();

                let second = SeriesAligner::align(&ascending_entity, &ascending_external).unwrap();

                let original_dates: Vec<Timestamp> = entity.iter().map(|r| r.date.clone()).collect();
                let original_values: Vec<f64> = entity.iter().map(|r| r.value).collect();
                let original_external: Vec<f64> = external.iter().map(|r| r.value).collect();
                prop_assert_eq!(second.labels, original_dates);
                prop_assert_eq!(second.primary, original_values);
                prop_assert_eq!(second.secondary, original_external);
            }
        }
    }
}
