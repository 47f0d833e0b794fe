//! Fixed-period tick loop driving the cycler.
//!
//! One timer fires every `period`, the first firing one full period after
//! start. Each tick is awaited before the timer is polled again, so ticks
//! never overlap; a tick that overruns delays the next firing instead of
//! causing a burst.

use crate::cycler::Cycler;
use crate::error::{AppError, AppResult};
use ndvi_common::{NdviError, Result};
use ndvi_config::{ScheduleConfig, TickErrorPolicy};
use ndvi_graphs::ChartRenderer;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Why a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The shutdown token was cancelled.
    Cancelled,
    /// The configured tick limit was reached.
    TickLimit,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks fired, failed ones included.
    pub ticks: u64,
    /// Ticks that failed and were skipped.
    pub failures: u64,
    /// Why the run ended.
    pub stopped_by: StopReason,
}

/// Periodic driver for [`Cycler::tick`].
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    policy: TickErrorPolicy,
    max_ticks: Option<u64>,
}

impl TickScheduler {
    /// Creates a scheduler firing every `period` that stops on the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`NdviError::Validation`] when `period` is zero.
    pub fn new(period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(NdviError::validation_field(
                "Tick period must be greater than zero",
                "schedule.period_millis",
            ));
        }
        Ok(Self {
            period,
            policy: TickErrorPolicy::Stop,
            max_ticks: None,
        })
    }

    /// Creates a scheduler from the `schedule` section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NdviError::Validation`] when the configured period is zero.
    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        let scheduler = Self::new(config.period())?.with_policy(config.on_error);
        Ok(Self {
            max_ticks: config.max_ticks,
            ..scheduler
        })
    }

    /// Sets what happens when a tick fails.
    #[must_use]
    pub const fn with_policy(mut self, policy: TickErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stops the run after `max_ticks` firings.
    #[must_use]
    pub const fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Tick period.
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Runs until `shutdown` is cancelled, the tick limit is hit, or a tick
    /// fails under [`TickErrorPolicy::Stop`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::TickFailed`] for the first failed tick under the stop policy.
    pub async fn run<R: ChartRenderer>(
        &self,
        cycler: &mut Cycler<R>,
        shutdown: CancellationToken,
    ) -> AppResult<RunSummary> {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            period_ms = u64::try_from(self.period.as_millis()).unwrap_or(u64::MAX),
            policy = ?self.policy,
            max_ticks = ?self.max_ticks,
            "Tick schedule started"
        );

        let mut ticks = 0u64;
        let mut failures = 0u64;

        let stopped_by = loop {
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                break StopReason::TickLimit;
            }

            tokio::select! {
                biased;
                () = shutdown.cancelled() => break StopReason::Cancelled,
                _ = interval.tick() => {}
            }

            ticks += 1;
            match cycler.tick().await {
                Ok(index) => debug!(tick = ticks, index, "Tick rendered"),
                Err(source) => match self.policy {
                    TickErrorPolicy::Stop => {
                        error!(tick = ticks, error = %source, "Tick failed, stopping schedule");
                        return Err(AppError::TickFailed {
                            tick: ticks,
                            source,
                        });
                    }
                    TickErrorPolicy::Skip => {
                        failures += 1;
                        warn!(
                            tick = ticks,
                            index = cycler.state().current_index(),
                            category = source.category(),
                            error = %source,
                            "Tick failed, skipping"
                        );
                    }
                },
            }
        };

        let summary = RunSummary {
            ticks,
            failures,
            stopped_by,
        };
        info!(?summary, "Tick schedule stopped");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let scheduler = TickScheduler::from_config(&ScheduleConfig {
            period_millis: 250,
            on_error: TickErrorPolicy::Skip,
            max_ticks: Some(4),
        })
        .unwrap();
        assert_eq!(scheduler.period(), Duration::from_millis(250));
        assert_eq!(scheduler.policy, TickErrorPolicy::Skip);
        assert_eq!(scheduler.max_ticks, Some(4));
    }

    #[test]
    fn test_builder_defaults_to_stop() {
        let scheduler = TickScheduler::new(Duration::from_millis(500))
            .unwrap()
            .with_max_ticks(2);
        assert_eq!(scheduler.policy, TickErrorPolicy::Stop);
        assert_eq!(scheduler.max_ticks, Some(2));
    }

    #[test]
    fn test_zero_period_is_rejected() {
        let err = TickScheduler::new(Duration::ZERO).unwrap_err();
        assert!(matches!(
            err,
            NdviError::Validation { field: Some(ref field), .. } if field == "schedule.period_millis"
        ));
    }

    #[test]
    fn test_zero_period_in_config_is_rejected() {
        let result = TickScheduler::from_config(&ScheduleConfig {
            period_millis: 0,
            on_error: TickErrorPolicy::Stop,
            max_ticks: Some(1),
        });
        assert_eq!(result.unwrap_err().category(), "validation");
    }
}
