//! Main entry point for the NDVI chart cycler.

use anyhow::Context;
use ndvi_chart::NdviChartApp;
use ndvi_common::init_logging;
use ndvi_config::ConfigLoader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    info!(
        ndvi = %config.data.ndvi_path.display(),
        precipitation = %config.data.precipitation_path.display(),
        period_ms = config.schedule.period_millis,
        "Starting NDVI chart cycler"
    );

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    let summary = NdviChartApp::new(config).run(shutdown).await?;
    info!(
        ticks = summary.ticks,
        failures = summary.failures,
        stopped_by = ?summary.stopped_by,
        "NDVI chart cycler finished"
    );

    Ok(())
}
