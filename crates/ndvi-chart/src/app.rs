//! Application wiring: datasets, renderer, cycler and schedule.

use crate::cycler::Cycler;
use crate::error::AppResult;
use crate::scheduler::{RunSummary, TickScheduler};
use ndvi_config::{ChartConfig, Config, TickErrorPolicy};
use ndvi_graphs::{ChartRenderer, DataProvider, LatestFrameRenderer, PngChartRenderer};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Main application structure.
pub struct NdviChartApp {
    config: Arc<Config>,
}

impl NdviChartApp {
    /// Creates a new application instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Loads the datasets, paints the first field, then cycles until stopped.
    pub async fn run(&self, shutdown: CancellationToken) -> AppResult<RunSummary> {
        let scheduler = TickScheduler::from_config(&self.config.schedule)?;
        let datasets = Arc::new(DataProvider::load(&self.config.data).await?);
        let renderer = build_renderer(&self.config.chart);
        let mut cycler = Cycler::new(datasets, renderer)?;

        if let Err(e) = cycler.render_current().await {
            match self.config.schedule.on_error {
                TickErrorPolicy::Stop => return Err(e.into()),
                TickErrorPolicy::Skip => warn!(error = %e, "Initial render failed, continuing"),
            }
        }

        scheduler.run(&mut cycler, shutdown).await
    }
}

/// Picks the PNG renderer when an output path is configured, else keeps frames in memory.
pub fn build_renderer(chart: &ChartConfig) -> Arc<dyn ChartRenderer> {
    match &chart.output_path {
        Some(path) => {
            info!(path = %path.display(), "Rendering charts to PNG");
            Arc::new(PngChartRenderer::new(chart.clone(), path.clone()))
        }
        None => {
            info!("No output path configured, keeping chart frames in memory");
            Arc::new(LatestFrameRenderer::new(chart.clone()))
        }
    }
}
