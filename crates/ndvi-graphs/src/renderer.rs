//! Two-axis line chart rendered with plotters and written as PNG.

use crate::layout::{value_range, x_axis_end, x_label_count};
use crate::traits::ChartRenderer;
use async_trait::async_trait;
use ndvi_common::{parse_hex_color, AlignedSeries, NdviError, Result};
use ndvi_config::ChartConfig;
use plotters::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Renders the field series on a left axis and the external series on a right axis.
pub struct PngChartRenderer {
    config: ChartConfig,
    output_path: PathBuf,
}

impl PngChartRenderer {
    /// Creates a renderer writing to `output_path`.
    pub fn new(config: ChartConfig, output_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output_path: output_path.into(),
        }
    }

    /// Path the chart is written to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Draws the chart and returns it PNG encoded.
    ///
    /// Drawing is synchronous, so it runs on the blocking pool.
    pub async fn render_to_bytes(
        &self,
        series: &AlignedSeries,
        entity_index: usize,
    ) -> Result<Vec<u8>> {
        let config = self.config.clone();
        let series = series.clone();
        let title = self.config.title_for(entity_index);

        tokio::task::spawn_blocking(move || draw_chart(&config, &series, &title))
            .await
            .map_err(|e| NdviError::render_with_source("Chart drawing task failed", e))?
    }
}

#[async_trait]
impl ChartRenderer for PngChartRenderer {
    async fn render(&self, series: &AlignedSeries, entity_index: usize) -> Result<()> {
        let png = self.render_to_bytes(series, entity_index).await?;
        write_atomically(&self.output_path, &png).await?;

        info!(
            entity_index,
            points = series.len(),
            bytes = png.len(),
            path = %self.output_path.display(),
            "Rendered chart"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "png"
    }
}

/// Writes `bytes` next to `path` and renames over it, so readers never see a partial image.
pub async fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    tokio::fs::write(&staging, bytes).await?;
    tokio::fs::rename(&staging, path).await?;
    debug!(path = %path.display(), "Replaced chart file");
    Ok(())
}

fn color(hex: &str) -> RGBColor {
    parse_hex_color(hex).map_or(RGBColor(0, 0, 0), |(r, g, b)| RGBColor(r, g, b))
}

fn draw_error<E: std::fmt::Debug>(err: E) -> NdviError {
    NdviError::render(format!("Failed to draw chart: {err:?}"))
}

fn draw_chart(config: &ChartConfig, series: &AlignedSeries, title: &str) -> Result<Vec<u8>> {
    let (width, height) = (config.width, config.height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&color(&config.background_color))
            .map_err(draw_error)?;

        let x_end = x_axis_end(series.len());
        let (primary_low, primary_high) = value_range(&series.primary, config.primary.axis_max);
        let (secondary_low, secondary_high) =
            value_range(&series.secondary, config.secondary.axis_max);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(56)
            .right_y_label_area_size(56)
            .build_cartesian_2d(0usize..x_end, primary_low..primary_high)
            .map_err(draw_error)?
            .set_secondary_coord(0usize..x_end, secondary_low..secondary_high);

        let labels = &series.labels;
        let format_label = |x: &usize| labels.get(*x).map(ToString::to_string).unwrap_or_default();

        chart
            .configure_mesh()
            .x_labels(x_label_count(series.len(), config.max_x_ticks))
            .x_label_formatter(&format_label)
            .y_desc(config.primary.label.as_str())
            .draw()
            .map_err(draw_error)?;

        chart
            .configure_secondary_axes()
            .y_desc(config.secondary.label.as_str())
            .draw()
            .map_err(draw_error)?;

        let primary_color = color(&config.primary.color);
        let secondary_color = color(&config.secondary.color);

        if !series.is_empty() {
            chart
                .draw_series(
                    AreaSeries::new(
                        series.primary.iter().copied().enumerate(),
                        primary_low,
                        primary_color.mix(0.2),
                    )
                    .border_style(primary_color.stroke_width(2)),
                )
                .map_err(draw_error)?
                .label(config.primary.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], primary_color.stroke_width(2))
                });

            chart
                .draw_secondary_series(LineSeries::new(
                    series.secondary.iter().copied().enumerate(),
                    secondary_color.stroke_width(2),
                ))
                .map_err(draw_error)?
                .label(config.secondary.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], secondary_color.stroke_width(2))
                });

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_error)?;
        }

        root.present().map_err(draw_error)?;
    }

    encode_png(width, height, buffer)
}

fn encode_png(width: u32, height: u32, buffer: Vec<u8>) -> Result<Vec<u8>> {
    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| NdviError::render("Bitmap buffer does not match chart dimensions"))?;

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .map_err(|e| NdviError::render_with_source("Failed to encode PNG", e))?;
    Ok(png.into_inner())
}
