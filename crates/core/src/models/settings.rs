use serde::{Deserialize, Serialize};

use super::palette::Palette;
use crate::errors::CoreError;

/// Element ids, class names and storage keys the dashboard binds to,
/// plus the palettes used for each theme.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeSettings,
    pub charts: ChartSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Key under which the preference is persisted (e.g., "theme").
    pub storage_key: String,

    /// Class placed on `<body>` while the dark theme is active.
    pub dark_class: String,

    /// Id of the toggle button.
    pub toggle_element_id: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            dark_class: "dark-mode".to_string(),
            toggle_element_id: "themeToggle".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Attribute on the root `<html>` element consulted for palette selection.
    pub theme_attribute: String,

    /// Canvas for the student performance (GPA) bar chart.
    pub performance_canvas_id: String,

    /// Canvas for the course enrollment line chart.
    pub enrollment_canvas_id: String,

    pub light_palette: Palette,
    pub dark_palette: Palette,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            theme_attribute: "data-bs-theme".to_string(),
            performance_canvas_id: "studentPerformanceChart".to_string(),
            enrollment_canvas_id: "courseAnalyticsChart".to_string(),
            light_palette: Palette::LIGHT,
            dark_palette: Palette::DARK,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; omitted fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject empty identifiers; they could never match an element.
    pub fn validate(&self) -> Result<(), CoreError> {
        let required = [
            ("theme.storage_key", &self.theme.storage_key),
            ("theme.dark_class", &self.theme.dark_class),
            ("theme.toggle_element_id", &self.theme.toggle_element_id),
            ("charts.theme_attribute", &self.charts.theme_attribute),
            ("charts.performance_canvas_id", &self.charts.performance_canvas_id),
            ("charts.enrollment_canvas_id", &self.charts.enrollment_canvas_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}
