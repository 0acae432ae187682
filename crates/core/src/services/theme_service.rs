use tracing::{debug, info};

use crate::dom::traits::Document;
use crate::errors::CoreError;
use crate::models::settings::ThemeSettings;
use crate::models::theme::Theme;
use crate::storage::traits::PreferenceStore;

/// Keeps the body's dark class, the toggle control's label and the
/// persisted preference in agreement.
///
/// Reads storage once at page load (`initialize`) and writes it on every
/// click (`toggle`). After any toggle the body class and the stored value
/// describe the same theme.
pub struct ThemeService {
    settings: ThemeSettings,
}

impl ThemeService {
    pub fn new(settings: ThemeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ThemeSettings {
        &self.settings
    }

    /// Theme recorded in storage. A missing or unrecognised value is light.
    pub fn stored_theme(&self, store: &dyn PreferenceStore) -> Result<Theme, CoreError> {
        let raw = store.get_item(&self.settings.storage_key)?;
        Ok(Theme::from_stored(raw.as_deref()))
    }

    /// Theme currently shown, judged by the body class.
    pub fn displayed_theme(&self, document: &dyn Document) -> Theme {
        if document.body_has_class(&self.settings.dark_class) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Page-load step: restore a stored dark preference.
    ///
    /// Only a stored `"dark"` changes the page (dark class + "Light Mode"
    /// label). Light or absent leaves the page's default markup alone.
    pub fn initialize(
        &self,
        store: &dyn PreferenceStore,
        document: &mut dyn Document,
    ) -> Result<Theme, CoreError> {
        document.require_element(&self.settings.toggle_element_id)?;

        let theme = self.stored_theme(store)?;
        debug!(store = store.name(), %theme, "theme preference read");

        if theme.is_dark() {
            document.add_body_class(&self.settings.dark_class);
            self.apply_label(document, theme)?;
        }
        Ok(theme)
    }

    /// Click step: flip the body class, relabel the control, persist.
    pub fn toggle(
        &self,
        store: &mut dyn PreferenceStore,
        document: &mut dyn Document,
    ) -> Result<Theme, CoreError> {
        document.require_element(&self.settings.toggle_element_id)?;

        let theme = if document.toggle_body_class(&self.settings.dark_class) {
            Theme::Dark
        } else {
            Theme::Light
        };

        self.apply_label(document, theme)?;
        store.set_item(&self.settings.storage_key, theme.as_str())?;
        info!(store = store.name(), %theme, "theme toggled");
        Ok(theme)
    }

    fn apply_label(&self, document: &mut dyn Document, theme: Theme) -> Result<(), CoreError> {
        let html = theme.toggle_label().to_html();
        document.set_inner_html(&self.settings.toggle_element_id, &html)
    }
}

impl Default for ThemeService {
    fn default() -> Self {
        Self::new(ThemeSettings::default())
    }
}
