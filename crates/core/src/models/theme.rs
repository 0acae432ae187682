use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// The page's visual mode.
///
/// Persisted as the lowercase strings `"light"` / `"dark"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The string written to preference storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Lenient read of a stored preference: only `"dark"` selects the dark
    /// theme, anything else (including no value at all) is light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Label shown on the toggle control while this theme is active.
    /// It always offers the *other* theme.
    pub fn toggle_label(self) -> ToggleLabel {
        match self {
            Theme::Dark => ToggleLabel {
                icon: "bi bi-brightness-high",
                text: "Light Mode",
            },
            Theme::Light => ToggleLabel {
                icon: "bi bi-moon",
                text: "Dark Mode",
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(CoreError::InvalidTheme(other.to_string())),
        }
    }
}

/// Icon + caption rendered inside the theme toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleLabel {
    /// Bootstrap Icons class list
    pub icon: &'static str,
    pub text: &'static str,
}

impl ToggleLabel {
    /// Inner HTML for the toggle control, e.g.
    /// `<i class="bi bi-moon"></i> Dark Mode`.
    pub fn to_html(&self) -> String {
        format!(r#"<i class="{}"></i> {}"#, self.icon, self.text)
    }
}
