//! In-memory renderer that keeps only the most recent frame.

use crate::traits::ChartRenderer;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ndvi_common::{format_timestamp, AlignedSeries, Result};
use ndvi_config::ChartConfig;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A rendered chart as data: title plus the series shown under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    /// Chart title, naming the active field.
    pub title: String,
    /// Field shown in this frame.
    pub entity_index: usize,
    /// Series on display.
    pub series: AlignedSeries,
    /// When the frame was produced.
    pub rendered_at: DateTime<Utc>,
}

/// Renderer that publishes each frame for lock-free readers.
pub struct LatestFrameRenderer {
    chart: ChartConfig,
    latest: ArcSwapOption<ChartFrame>,
    frames_rendered: AtomicU64,
}

impl LatestFrameRenderer {
    /// Creates a renderer titling frames from `chart`.
    pub fn new(chart: ChartConfig) -> Self {
        Self {
            chart,
            latest: ArcSwapOption::empty(),
            frames_rendered: AtomicU64::new(0),
        }
    }

    /// The most recently rendered frame, if any.
    pub fn latest(&self) -> Option<Arc<ChartFrame>> {
        self.latest.load_full()
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ChartRenderer for LatestFrameRenderer {
    async fn render(&self, series: &AlignedSeries, entity_index: usize) -> Result<()> {
        let frame = ChartFrame {
            title: self.chart.title_for(entity_index),
            entity_index,
            series: series.clone(),
            rendered_at: Utc::now(),
        };

        debug!(
            title = %frame.title,
            points = frame.series.len(),
            at = %format_timestamp(frame.rendered_at),
            "Published chart frame"
        );

        self.latest.store(Some(Arc::new(frame)));
        self.frames_rendered.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "latest_frame"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeriesAligner;
    use ndvi_common::test_utils::series_fixtures;

    #[tokio::test]
    async fn test_frames_replace_each_other() {
        let renderer = LatestFrameRenderer::new(ChartConfig::default());
        assert!(renderer.latest().is_none());

        let series = SeriesAligner::align(
            &series_fixtures::descending_entity(),
            &series_fixtures::descending_external(),
        )
        .unwrap();

        renderer.render(&series, 0).await.unwrap();
        renderer.render(&AlignedSeries::default(), 2).await.unwrap();

        let latest = renderer.latest().unwrap();
        assert_eq!(latest.entity_index, 2);
        assert_eq!(latest.title, "NDVI / Precipitation (Field Index: 2)");
        assert!(latest.series.is_empty());
        assert_eq!(renderer.frames_rendered(), 2);
    }

    #[tokio::test]
    async fn test_render_through_arc() {
        let renderer = Arc::new(LatestFrameRenderer::new(ChartConfig::default()));
        let shared: Arc<LatestFrameRenderer> = Arc::clone(&renderer);

        shared.render(&AlignedSeries::default(), 1).await.unwrap();
        assert_eq!(shared.name(), "latest_frame");
        assert_eq!(renderer.latest().map(|f| f.entity_index), Some(1));
    }
}
