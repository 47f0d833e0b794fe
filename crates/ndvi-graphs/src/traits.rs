//! Chart renderer trait definitions.

use async_trait::async_trait;
use ndvi_common::{AlignedSeries, Result};
use std::sync::Arc;

/// Presents an aligned series for one field.
///
/// Each call wholly replaces whatever the renderer displayed before.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Renders `series` for the field at `entity_index`.
    async fn render(&self, series: &AlignedSeries, entity_index: usize) -> Result<()>;

    /// Gets the name of this renderer.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<R> ChartRenderer for Arc<R>
where
    R: ChartRenderer + ?Sized,
{
    async fn render(&self, series: &AlignedSeries, entity_index: usize) -> Result<()> {
        (**self).render(series, entity_index).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
