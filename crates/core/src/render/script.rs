use tracing::debug;

use super::traits::ChartRenderer;
use crate::errors::CoreError;
use crate::models::chart::{ChartConfig, ChartHandle};

/// One `new Chart(...)` statement produced by [`ChartJsScriptRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedChart {
    pub handle: ChartHandle,
    pub statement: String,
}

/// Renders charts as Chart.js constructor calls, for pages assembled on the
/// server. Each created chart becomes one statement; [`Self::script`] wraps
/// them all in a `DOMContentLoaded` listener.
#[derive(Debug, Default)]
pub struct ChartJsScriptRenderer {
    charts: Vec<ScriptedChart>,
}

impl ChartJsScriptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charts(&self) -> &[ScriptedChart] {
        &self.charts
    }

    /// The complete script body, ready to drop into a `<script>` tag.
    pub fn script(&self) -> String {
        let mut out = String::from("document.addEventListener(\"DOMContentLoaded\", () => {\n");
        for chart in &self.charts {
            out.push_str("    ");
            out.push_str(&chart.statement);
            out.push('\n');
        }
        out.push_str("});\n");
        out
    }
}

impl ChartRenderer for ChartJsScriptRenderer {
    fn name(&self) -> &str {
        "chartjs-script"
    }

    fn create_chart(&mut self, config: &ChartConfig) -> Result<ChartHandle, CoreError> {
        let canvas = serde_json::to_string(&config.canvas_id).map_err(|e| CoreError::Render {
            renderer: self.name().to_string(),
            message: e.to_string(),
        })?;
        // `</` would end the surrounding <script> element early
        let body = config.to_library_json()?.replace("</", "<\\/");

        let statement = format!(
            "new Chart(document.getElementById({canvas}).getContext('2d'), {body});"
        );
        let handle = ChartHandle::new(config, self.name());
        debug!(canvas = %config.canvas_id, kind = %config.kind, "chart statement emitted");

        self.charts.push(ScriptedChart {
            handle: handle.clone(),
            statement,
        });
        Ok(handle)
    }
}
