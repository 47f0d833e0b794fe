//! Measurement model shared by the aligner, the cycler, and the renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque ordering key for a measurement.
///
/// Carries the source's date text verbatim. It is never parsed; series are
/// ordered by position only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Creates a new timestamp from its source representation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw source representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// One timestamped numeric observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// When the observation was taken.
    pub date: Timestamp,
    /// Observed value, passed through unmodified.
    pub value: f64,
}

impl MeasurementRecord {
    /// Creates a new measurement record.
    pub fn new(date: impl Into<Timestamp>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// A single field with its own measurement series, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity {
    /// Measurements in source order (descending by time).
    pub records: Vec<MeasurementRecord>,
}

impl Entity {
    /// Creates an entity from records already in descending order.
    pub fn new(records: Vec<MeasurementRecord>) -> Self {
        Self { records }
    }

    /// Number of measurements held by this entity.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this entity holds no measurements.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<MeasurementRecord>> for Entity {
    fn from(records: Vec<MeasurementRecord>) -> Self {
        Self::new(records)
    }
}

/// Chronologically ascending, positionally matched series ready for display.
///
/// `labels`, `primary` and `secondary` always have the same length when built
/// by the aligner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    /// Ascending timestamps, one per point.
    pub labels: Vec<Timestamp>,
    /// Per-entity values (NDVI), aligned with `labels`.
    pub primary: Vec<f64>,
    /// Shared external values (precipitation), aligned with `labels`.
    pub secondary: Vec<f64>,
}

impl AlignedSeries {
    /// Number of aligned points.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_serializes_as_plain_string() {
        let ts = Timestamp::from("2017-05-01");
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2017-05-01\"");
        assert_eq!(ts.to_string(), "2017-05-01");
    }

    #[test]
    fn test_entity_deserializes_from_record_array() {
        let entity: Entity =
            serde_json::from_str(r#"[{"date":"b","value":0.4},{"date":"a","value":0.3}]"#)
                .unwrap();
        assert_eq!(entity.len(), 2);
        assert_eq!(entity.records[0], MeasurementRecord::new("b", 0.4));
    }

    #[test]
    fn test_record_ignores_unknown_fields() {
        let record: MeasurementRecord =
            serde_json::from_str(r#"{"date":"2017-05-01","value":0.61,"cloud":0.02}"#).unwrap();
        assert_eq!(record.value, 0.61);
    }
}
