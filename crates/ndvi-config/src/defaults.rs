//! Default values.

use crate::schema::*;
use ndvi_common::LoggingConfig;
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig::default(),
            data: DataConfig::default(),
            chart: ChartConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            period_millis: 500,
            on_error: TickErrorPolicy::Stop,
            max_ticks: None,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            ndvi_path: PathBuf::from("data/ndvi.json"),
            precipitation_path: PathBuf::from("data/precipitation.json"),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_path: Some(PathBuf::from("ndvi-chart.png")),
            width: 1024,
            height: 576,
            max_x_ticks: 25,
            background_color: "#FFFFFF".to_string(),
            title_prefix: "NDVI / Precipitation".to_string(),
            primary: SeriesStyle {
                label: "NDVI".to_string(),
                color: "#77E218".to_string(),
                axis_max: Some(1.0),
            },
            secondary: SeriesStyle {
                label: "Precipitation (in)".to_string(),
                color: "#1B9BFF".to_string(),
                axis_max: None,
            },
        }
    }
}
