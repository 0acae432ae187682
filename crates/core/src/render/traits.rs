use crate::errors::CoreError;
use crate::models::chart::{ChartConfig, ChartHandle};

/// Adapter between chart descriptors and a concrete charting backend.
///
/// The services only build `ChartConfig`s; a renderer decides what drawing
/// one means (emitting a script, calling the library in the browser, ...).
pub trait ChartRenderer {
    /// Human-readable name of this renderer (for logs/errors).
    fn name(&self) -> &str;

    /// Create one chart on the canvas named by `config.canvas_id`.
    fn create_chart(&mut self, config: &ChartConfig) -> Result<ChartHandle, CoreError>;
}
