//! Loads the per-field NDVI collection and the shared precipitation series.

use ndvi_common::{Entity, MeasurementRecord, NdviError, Result};
use ndvi_config::DataConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Top level of an NDVI values response.
#[derive(Debug, Deserialize)]
struct NdviValuesResponse {
    results: Vec<FieldResult>,
}

#[derive(Debug, Deserialize)]
struct FieldResult {
    value: FieldFeature,
}

/// GeoJSON feature; the geometry is not needed for charting and is ignored.
#[derive(Debug, Deserialize)]
struct FieldFeature {
    properties: FieldProperties,
}

#[derive(Debug, Deserialize)]
struct FieldProperties {
    ndvi_values: Vec<MeasurementRecord>,
}

/// Everything the cycler needs, materialized once at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    /// One entity per field, in response order.
    pub entities: Vec<Entity>,
    /// Shared external series (precipitation), newest first.
    pub external: Vec<MeasurementRecord>,
}

impl Datasets {
    /// Bundles already loaded series.
    pub const fn new(entities: Vec<Entity>, external: Vec<MeasurementRecord>) -> Self {
        Self { entities, external }
    }

    /// Indices of entities whose length differs from the external series.
    ///
    /// These entities will fail alignment when the cycler reaches them.
    pub fn mismatched_entities(&self) -> Vec<usize> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, entity)| entity.len() != self.external.len())
            .map(|(index, _)| index)
            .collect()
    }
}

/// Reads the upstream JSON documents into [`Datasets`].
pub struct DataProvider;

impl DataProvider {
    /// Parses an NDVI values response into one entity per result.
    pub fn parse_ndvi_response(json: &str) -> Result<Vec<Entity>> {
        let response: NdviValuesResponse = serde_json::from_str(json)?;
        Ok(response
            .results
            .into_iter()
            .map(|result| Entity::new(result.value.properties.ndvi_values))
            .collect())
    }

    /// Parses a precipitation series (a plain array of records).
    pub fn parse_precipitation(json: &str) -> Result<Vec<MeasurementRecord>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds datasets from in-memory JSON documents.
    pub fn from_json(ndvi_json: &str, precipitation_json: &str) -> Result<Datasets> {
        let datasets = Datasets::new(
            Self::parse_ndvi_response(ndvi_json)?,
            Self::parse_precipitation(precipitation_json)?,
        );
        Self::report(&datasets);
        Ok(datasets)
    }

    /// Reads both documents from the paths named in `config`.
    pub async fn load(config: &DataConfig) -> Result<Datasets> {
        let ndvi_json = read_document(&config.ndvi_path).await?;
        let precipitation_json = read_document(&config.precipitation_path).await?;
        Self::from_json(&ndvi_json, &precipitation_json)
    }

    fn report(datasets: &Datasets) {
        info!(
            entities = datasets.entities.len(),
            external_points = datasets.external.len(),
            "Loaded datasets"
        );

        let mismatched = datasets.mismatched_entities();
        if !mismatched.is_empty() {
            warn!(
                ?mismatched,
                expected = datasets.external.len(),
                "Some fields do not match the precipitation series length and will fail to align"
            );
        }
    }
}

async fn read_document(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        NdviError::config_with_source(format!("Failed to read dataset '{}'", path.display()), e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndvi_common::test_utils::{records, series_fixtures};

    #[test]
    fn test_parse_ndvi_response_keeps_field_order() {
        let entities = DataProvider::parse_ndvi_response(series_fixtures::ndvi_response_json())
            .unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].records[0], MeasurementRecord::new("2017-05-21", 0.62));
        assert_eq!(entities[1].records[2], MeasurementRecord::new("2017-05-01", 0.40));
    }

    #[test]
    fn test_parse_precipitation() {
        let series = DataProvider::parse_precipitation(series_fixtures::precipitation_json())
            .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[2].value, 1.35);
    }

    #[test]
    fn test_malformed_response_is_a_serialization_error() {
        let err = DataProvider::parse_ndvi_response(r#"{"results": [{"value": {}}]}"#)
            .unwrap_err();
        assert!(matches!(err, NdviError::Serialization(_)));
    }

    #[test]
    fn test_mismatched_entities() {
        let datasets = Datasets::new(
            vec![
                Entity::new(records(&[("2", 0.1), ("1", 0.2)])),
                Entity::new(records(&[("1", 0.2)])),
            ],
            records(&[("2", 0.0), ("1", 0.5)]),
        );
        assert_eq!(datasets.mismatched_entities(), vec![1]);
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let ndvi_path = dir.path().join("ndvi.json");
        let precipitation_path = dir.path().join("precipitation.json");
        std::fs::write(&ndvi_path, series_fixtures::ndvi_response_json()).unwrap();
        std::fs::write(&precipitation_path, series_fixtures::precipitation_json()).unwrap();

        let datasets = DataProvider::load(&DataConfig {
            ndvi_path,
            precipitation_path,
        })
        .await
        .unwrap();

        assert_eq!(datasets.entities.len(), 2);
        assert!(datasets.mismatched_entities().is_empty());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = tokio_test::block_on(DataProvider::load(&DataConfig {
            ndvi_path: "/nonexistent/ndvi.json".into(),
            precipitation_path: "/nonexistent/precipitation.json".into(),
        }))
        .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ndvi.json"));
    }
}
