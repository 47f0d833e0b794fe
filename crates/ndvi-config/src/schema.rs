//! Configuration schema definitions using serde.

use ndvi_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the NDVI chart cycler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tick schedule configuration.
    pub schedule: ScheduleConfig,
    /// Input dataset locations.
    pub data: DataConfig,
    /// Chart presentation configuration.
    pub chart: ChartConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// What the scheduler does when a tick fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickErrorPolicy {
    /// Stop the schedule and surface the error.
    #[default]
    Stop,
    /// Log the error and wait for the next firing.
    Skip,
}

/// Tick schedule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Milliseconds between ticks; must be greater than zero.
    pub period_millis: u64,
    /// Behavior on a failed tick.
    pub on_error: TickErrorPolicy,
    /// Stop after this many ticks; unbounded when absent.
    pub max_ticks: Option<u64>,
}

impl ScheduleConfig {
    /// Tick period as a `Duration`.
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.period_millis)
    }
}

/// Input dataset locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the NDVI values response (JSON).
    pub ndvi_path: PathBuf,
    /// Path to the precipitation series (JSON).
    pub precipitation_path: PathBuf,
}

/// Styling of one plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// Legend label.
    pub label: String,
    /// Line color in `#RRGGBB` form.
    pub color: String,
    /// Fixed upper bound of the series axis; auto-ranged when absent.
    #[serde(default)]
    pub axis_max: Option<f64>,
}

/// Chart presentation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Where the PNG is written; frames stay in memory when absent.
    pub output_path: Option<PathBuf>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Maximum number of labelled x-axis ticks.
    pub max_x_ticks: usize,
    /// Background color in `#RRGGBB` form.
    pub background_color: String,
    /// Title text preceding the field index.
    pub title_prefix: String,
    /// Per-field (left axis) series style.
    pub primary: SeriesStyle,
    /// Shared external (right axis) series style.
    pub secondary: SeriesStyle,
}

impl ChartConfig {
    /// Title shown for the field at `entity_index`.
    pub fn title_for(&self, entity_index: usize) -> String {
        format!("{} (Field Index: {entity_index})", self.title_prefix)
    }
}
