//! Integration tests for ndvi-graphs crate.
//!
//! These tests run upstream-shaped documents through parsing, alignment and
//! the in-memory renderer.

use ndvi_common::test_utils::{init_test_logging, series_fixtures};
use ndvi_common::{NdviError, Timestamp};
use ndvi_config::ChartConfig;
use ndvi_graphs::{ChartRenderer, DataProvider, LatestFrameRenderer, SeriesAligner};

#[tokio::test]
async fn test_fixture_pipeline_renders_every_field() {
    init_test_logging();

    let datasets = DataProvider::from_json(
        series_fixtures::ndvi_response_json(),
        series_fixtures::precipitation_json(),
    )
    .unwrap();
    let renderer = LatestFrameRenderer::new(ChartConfig::default());

    for index in 0..datasets.entities.len() {
        let series =
            SeriesAligner::align_entity(&datasets.entities, index, &datasets.external).unwrap();
        renderer.render(&series, index).await.unwrap();
    }

    let latest = renderer.latest().unwrap();
    assert_eq!(latest.entity_index, 1);
    assert_eq!(
        latest.series.labels,
        vec![
            Timestamp::from("2017-05-01"),
            Timestamp::from("2017-05-11"),
            Timestamp::from("2017-05-21"),
        ]
    );
    assert_eq!(latest.series.primary, vec![0.40, 0.52, 0.55]);
    assert_eq!(latest.series.secondary, vec![1.35, 0.0, 0.12]);
    assert_eq!(renderer.frames_rendered(), 2);
}

#[test]
fn test_short_precipitation_series_fails_alignment() {
    let datasets = DataProvider::from_json(
        series_fixtures::ndvi_response_json(),
        r#"[{ "date": "2017-05-21", "value": 0.12 }]"#,
    )
    .unwrap();

    assert_eq!(datasets.mismatched_entities(), vec![0, 1]);
    let err = SeriesAligner::align_entity(&datasets.entities, 0, &datasets.external).unwrap_err();
    assert!(matches!(
        err,
        NdviError::MismatchedSeriesLength {
            entity: 3,
            external: 1
        }
    ));
}
