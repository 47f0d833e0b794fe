//! Runtime validation of loaded configuration.

use crate::schema::{ChartConfig, Config, SeriesStyle};
use ndvi_common::{parse_hex_color, NdviError, Result};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.schedule.period_millis == 0 {
            return Err(NdviError::validation_field(
                "tick period must be greater than zero",
                "schedule.period_millis",
            ));
        }

        if config.data.ndvi_path.as_os_str().is_empty() {
            return Err(NdviError::validation_field(
                "NDVI data path cannot be empty",
                "data.ndvi_path",
            ));
        }

        if config.data.precipitation_path.as_os_str().is_empty() {
            return Err(NdviError::validation_field(
                "precipitation data path cannot be empty",
                "data.precipitation_path",
            ));
        }

        Self::validate_chart(&config.chart)
    }

    fn validate_chart(chart: &ChartConfig) -> Result<()> {
        if chart.width == 0 || chart.height == 0 {
            return Err(NdviError::validation_field(
                format!("chart dimensions must be non-zero, got {}x{}", chart.width, chart.height),
                "chart.width",
            ));
        }

        if chart.max_x_ticks == 0 {
            return Err(NdviError::validation_field(
                "at least one x-axis tick is required",
                "chart.max_x_ticks",
            ));
        }

        if parse_hex_color(&chart.background_color).is_none() {
            return Err(NdviError::validation_field(
                format!("invalid color '{}'", chart.background_color),
                "chart.background_color",
            ));
        }

        Self::validate_series(&chart.primary, "chart.primary")?;
        Self::validate_series(&chart.secondary, "chart.secondary")
    }

    fn validate_series(style: &SeriesStyle, field: &str) -> Result<()> {
        if parse_hex_color(&style.color).is_none() {
            return Err(NdviError::validation_field(
                format!("invalid color '{}'", style.color),
                format!("{field}.color"),
            ));
        }

        if let Some(max) = style.axis_max {
            if !max.is_finite() || max <= 0.0 {
                return Err(NdviError::validation_field(
                    format!("axis maximum must be positive and finite, got {max}"),
                    format!("{field}.axis_max"),
                ));
            }
        }

        Ok(())
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate(self)
    }
}
