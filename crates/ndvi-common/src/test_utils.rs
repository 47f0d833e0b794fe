//! Test utilities and shared test helpers for the NDVI chart cycler.
//!
//! Fixtures mirror the shapes produced by the upstream data sources so that
//! every crate in the workspace tests against the same inputs.

use crate::types::{Entity, MeasurementRecord};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Build records from `(date, value)` pairs, keeping the given order.
pub fn records(points: &[(&str, f64)]) -> Vec<MeasurementRecord> {
    points
        .iter()
        .map(|(date, value)| MeasurementRecord::new(*date, *value))
        .collect()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Measurement fixtures.
pub mod series_fixtures {
    use super::*;

    /// Three-point field series, newest first.
    pub fn descending_entity() -> Vec<MeasurementRecord> {
        records(&[("3", 0.5), ("2", 0.4), ("1", 0.3)])
    }

    /// Three-point precipitation series, newest first.
    pub fn descending_external() -> Vec<MeasurementRecord> {
        records(&[("3", 1.0), ("2", 0.0), ("1", 2.0)])
    }

    /// Three fields sharing the dates of `descending_external`.
    pub fn three_fields() -> Vec<Entity> {
        vec![
            Entity::new(records(&[("3", 0.5), ("2", 0.4), ("1", 0.3)])),
            Entity::new(records(&[("3", 0.7), ("2", 0.6), ("1", 0.2)])),
            Entity::new(records(&[("3", 0.1), ("2", 0.8), ("1", 0.9)])),
        ]
    }

    /// NDVI values API response with two fields, as served upstream.
    pub fn ndvi_response_json() -> &'static str {
        r#"{
  "results": [
    {
      "value": {
        "type": "Feature",
        "geometry": { "type": "Polygon", "coordinates": [[[-93.1, 41.9], [-93.0, 41.9], [-93.0, 42.0], [-93.1, 41.9]]] },
        "properties": {
          "ndvi_values": [
            { "date": "2017-05-21", "value": 0.62 },
            { "date": "2017-05-11", "value": 0.48 },
            { "date": "2017-05-01", "value": 0.31 }
          ]
        }
      }
    },
    {
      "value": {
        "type": "Feature",
        "geometry": null,
        "properties": {
          "ndvi_values": [
            { "date": "2017-05-21", "value": 0.55 },
            { "date": "2017-05-11", "value": 0.52 },
            { "date": "2017-05-01", "value": 0.40 }
          ]
        }
      }
    }
  ]
}"#
    }

    /// Precipitation series matching `ndvi_response_json`, newest first.
    pub fn precipitation_json() -> &'static str {
        r#"[
  { "date": "2017-05-21", "value": 0.12 },
  { "date": "2017-05-11", "value": 0.0 },
  { "date": "2017-05-01", "value": 1.35 }
]"#
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
schedule:
  period_millis: 250

data:
  ndvi_path: "fixtures/ndvi.json"
  precipitation_path: "fixtures/precipitation.json"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "schedule:\n",
            "  period_millis: 500\n",
            "  on_error: skip\n",
            "  max_ticks: 12\n",
            "\n",
            "data:\n",
            "  ndvi_path: \"fixtures/ndvi.json\"\n",
            "  precipitation_path: \"fixtures/precipitation.json\"\n",
            "\n",
            "chart:\n",
            "  output_path: \"out/chart.png\"\n",
            "  width: 800\n",
            "  height: 400\n",
            "  max_x_ticks: 10\n",
            "  background_color: \"#FAFAFA\"\n",
            "  title_prefix: \"NDVI vs Rain\"\n",
            "  primary:\n",
            "    label: \"NDVI\"\n",
            "    color: \"#77E218\"\n",
            "    axis_max: 1.0\n",
            "  secondary:\n",
            "    label: \"Precipitation (in)\"\n",
            "    color: \"#1B9BFF\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"compact\"\n",
            "  include_targets: false\n"
        )
    }

    /// The minimal configuration in TOML form.
    pub fn minimal_config_toml() -> &'static str {
        r#"
[schedule]
period_millis = 750

[data]
ndvi_path = "fixtures/ndvi.json"
precipitation_path = "fixtures/precipitation.json"
"#
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use crate::types::MeasurementRecord;
    use proptest::prelude::*;

    /// Strategy for a single measurement with a date-like label.
    pub fn record_strategy() -> impl Strategy<Value = MeasurementRecord> {
        (r"20[0-9]{2}-[01][0-9]-[0-3][0-9]", 0.0f64..=1.0)
            .prop_map(|(date, value)| MeasurementRecord::new(date, value))
    }

    /// Strategy for two series of identical length.
    pub fn paired_series_strategy(
        max_len: usize,
    ) -> impl Strategy<Value = (Vec<MeasurementRecord>, Vec<MeasurementRecord>)> {
        (0..=max_len).prop_flat_map(|len| {
            (
                prop::collection::vec(record_strategy(), len),
                prop::collection::vec(record_strategy(), len),
            )
        })
    }

    /// Strategy for a non-empty entity count.
    pub fn entity_count_strategy() -> impl Strategy<Value = usize> {
        1usize..=64
    }
}
