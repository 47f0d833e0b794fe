//! Active-field pointer and the tick that advances it.

use ndvi_common::{NdviError, Result};
use ndvi_graphs::{ChartRenderer, Datasets, SeriesAligner};
use std::sync::Arc;
use tracing::{debug, info};

/// Which field is on display.
///
/// Always holds `current_index < entity_count` with `entity_count > 0`; the
/// only way to obtain one is [`CycleState::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleState {
    current_index: usize,
    entity_count: usize,
}

impl CycleState {
    /// Starts the cycle at the first field.
    ///
    /// # Errors
    ///
    /// Returns [`NdviError::EmptyEntityCollection`] when there is nothing to cycle through.
    pub fn initialize(entity_count: usize) -> Result<Self> {
        if entity_count == 0 {
            return Err(NdviError::EmptyEntityCollection);
        }
        Ok(Self {
            current_index: 0,
            entity_count,
        })
    }

    /// Moves to the next field, wrapping back to the first after the last.
    #[must_use]
    pub const fn advance(self) -> Self {
        Self {
            current_index: (self.current_index + 1) % self.entity_count,
            entity_count: self.entity_count,
        }
    }

    /// Index of the field on display.
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of fields being cycled.
    pub const fn entity_count(&self) -> usize {
        self.entity_count
    }
}

/// Owns the cycle state and pushes a fresh series to the renderer on every tick.
pub struct Cycler<R> {
    state: CycleState,
    datasets: Arc<Datasets>,
    renderer: R,
}

impl<R: ChartRenderer> Cycler<R> {
    /// Creates a cycler positioned on the first field.
    ///
    /// # Errors
    ///
    /// Returns [`NdviError::EmptyEntityCollection`] when `datasets` holds no fields.
    pub fn new(datasets: Arc<Datasets>, renderer: R) -> Result<Self> {
        let state = CycleState::initialize(datasets.entities.len())?;
        info!(
            entities = state.entity_count(),
            renderer = renderer.name(),
            "Cycler initialized"
        );
        Ok(Self {
            state,
            datasets,
            renderer,
        })
    }

    /// Current cycle state.
    pub const fn state(&self) -> CycleState {
        self.state
    }

    /// The renderer frames are handed to.
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Renders the field on display without advancing.
    pub async fn render_current(&self) -> Result<usize> {
        let index = self.state.current_index();
        self.refresh(index).await?;
        Ok(index)
    }

    /// Advances to the next field and renders it, returning the new index.
    ///
    /// The advance sticks even when the refresh fails, so a malformed field
    /// is left behind on the following tick.
    pub async fn tick(&mut self) -> Result<usize> {
        self.state = self.state.advance();
        let index = self.state.current_index();
        debug!(index, "Advanced to next field");
        self.refresh(index).await?;
        Ok(index)
    }

    async fn refresh(&self, index: usize) -> Result<()> {
        if index >= self.state.entity_count() {
            return Err(NdviError::index_out_of_range(index, self.state.entity_count()));
        }

        let series =
            SeriesAligner::align_entity(&self.datasets.entities, index, &self.datasets.external)?;
        self.renderer.render(&series, index).await
    }
}
