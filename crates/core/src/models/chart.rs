use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::palette::Rgba;
use crate::errors::CoreError;

/// Chart types the dashboard draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Line => write!(f, "line"),
        }
    }
}

/// Labels and values for a single series, before any styling.
///
/// Fields are private so every series goes through [`SeriesData::new`];
/// a deserialized series should still be checked with [`SeriesData::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl SeriesData {
    /// Pair labels with values. Both sides must have the same, non-zero length
    /// and every value must be finite.
    pub fn new<L, I>(labels: I, values: Vec<f64>) -> Result<Self, CoreError>
    where
        L: Into<String>,
        I: IntoIterator<Item = L>,
    {
        let series = Self {
            labels: labels.into_iter().map(Into::into).collect(),
            values,
        };
        series.validate()?;
        Ok(series)
    }

    /// Built-in sample data, known to be well formed.
    pub(crate) fn from_static(labels: &[&str], values: &[f64]) -> Self {
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            values: values.to_vec(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.labels.is_empty() {
            return Err(CoreError::ValidationError("series has no data points".into()));
        }
        if self.labels.len() != self.values.len() {
            return Err(CoreError::ValidationError(format!(
                "series has {} labels but {} values",
                self.labels.len(),
                self.values.len()
            )));
        }
        if let Some(v) = self.values.iter().find(|v| !v.is_finite()) {
            return Err(CoreError::ValidationError(format!(
                "series value {v} is not finite"
            )));
        }
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<f64>) {
        (self.labels, self.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One dataset inside a chart. Optional fields are omitted from the
/// serialized form so the charting library falls back to its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Rgba>,
    /// Corner radius of bars, in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    /// Bezier curve tension of lines (0 = straight segments)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            background_color: None,
            border_color: None,
            border_radius: None,
            tension: None,
            fill: None,
            point_radius: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub display: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginOptions {
    pub legend: LegendOptions,
}

/// Value-axis bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisScale {
    pub begin_at_zero: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl AxisScale {
    /// The lowest value the axis is pinned to, if any.
    /// `beginAtZero` pins it to 0 unless an explicit `min` overrides it.
    pub fn lower_bound(&self) -> Option<f64> {
        match (self.min, self.begin_at_zero) {
            (Some(min), _) => Some(min),
            (None, true) => Some(0.0),
            (None, false) => None,
        }
    }

    pub fn upper_bound(&self) -> Option<f64> {
        self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub y: AxisScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: PluginOptions,
    pub scales: Scales,
}

impl ChartOptions {
    pub fn legend_visible(&self) -> bool {
        self.plugins.legend.display
    }
}

/// A complete chart descriptor.
///
/// Serializes to the `{ type, data, options }` object the charting library
/// takes. The canvas id is where it gets drawn and is kept out of that object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(skip)]
    pub canvas_id: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    /// The descriptor as the JSON object handed to the charting library.
    pub fn to_library_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|e| {
            CoreError::Serialization(format!(
                "Failed to serialize chart for #{}: {e}",
                self.canvas_id
            ))
        })
    }

    /// Number of points in the first dataset.
    pub fn point_count(&self) -> usize {
        self.data.datasets.first().map_or(0, |d| d.data.len())
    }
}

/// Identity of a chart a renderer has created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartHandle {
    pub id: Uuid,
    pub canvas_id: String,
    pub kind: ChartKind,
    /// Name of the renderer that drew it
    pub renderer: String,
}

impl ChartHandle {
    pub fn new(config: &ChartConfig, renderer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            canvas_id: config.canvas_id.clone(),
            kind: config.kind,
            renderer: renderer.into(),
        }
    }
}
