pub mod dom;
pub mod errors;
pub mod models;
pub mod render;
pub mod services;
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod web;

use tracing::debug;

use dom::traits::Document;
use errors::CoreError;
use models::chart::ChartHandle;
use models::settings::Settings;
use models::theme::Theme;
use render::traits::ChartRenderer;
use services::{chart_service::ChartService, theme_service::ThemeService};
use storage::traits::PreferenceStore;

/// Main entry point for the campus dashboard core library.
///
/// Owns the preference store and both services, and maps the three page
/// events onto them:
/// - page load → restore the stored theme
/// - DOM ready → draw the two charts (once)
/// - toggle click → flip and persist the theme
///
/// The page itself is passed in per call; it belongs to the host.
#[must_use]
pub struct Dashboard<S: PreferenceStore> {
    store: S,
    settings: Settings,
    theme_service: ThemeService,
    chart_service: ChartService,
    /// Charts drawn by `on_dom_ready`; `None` until then.
    charts: Option<Vec<ChartHandle>>,
}

impl<S: PreferenceStore> std::fmt::Debug for Dashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("store", &self.store.name())
            .field("settings", &self.settings)
            .field("charts", &self.charts.as_ref().map(Vec::len))
            .finish()
    }
}

impl<S: PreferenceStore> Dashboard<S> {
    /// Dashboard with the default element ids, storage key and palettes.
    pub fn new(store: S) -> Self {
        Self::build(store, Settings::default())
    }

    /// Dashboard bound to custom ids/keys/palettes.
    pub fn with_settings(store: S, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(store, settings))
    }

    fn build(store: S, settings: Settings) -> Self {
        Self {
            theme_service: ThemeService::new(settings.theme.clone()),
            chart_service: ChartService::new(settings.charts.clone()),
            store,
            settings,
            charts: None,
        }
    }

    // ── Page events ─────────────────────────────────────────────────

    /// Restore the persisted theme onto a freshly loaded page.
    pub fn on_page_load(&mut self, document: &mut dyn Document) -> Result<Theme, CoreError> {
        self.theme_service.initialize(&self.store, document)
    }

    /// Draw both charts. Only the first call reaches the renderer; later
    /// calls return the charts already drawn.
    pub fn on_dom_ready(
        &mut self,
        document: &dyn Document,
        renderer: &mut dyn ChartRenderer,
    ) -> Result<&[ChartHandle], CoreError> {
        if self.charts.is_none() {
            let handles = self.chart_service.render_all(document, renderer)?;
            self.charts = Some(handles);
        } else {
            debug!("charts already rendered for this page");
        }
        Ok(self.charts.as_deref().unwrap_or_default())
    }

    /// Flip the theme and persist it. Existing charts keep their colors.
    pub fn on_toggle_click(&mut self, document: &mut dyn Document) -> Result<Theme, CoreError> {
        self.theme_service.toggle(&mut self.store, document)
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Theme currently shown on `document`.
    #[must_use]
    pub fn displayed_theme(&self, document: &dyn Document) -> Theme {
        self.theme_service.displayed_theme(document)
    }

    /// Theme currently persisted.
    pub fn stored_theme(&self) -> Result<Theme, CoreError> {
        self.theme_service.stored_theme(&self.store)
    }

    #[must_use]
    pub fn charts(&self) -> &[ChartHandle] {
        self.charts.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn chart_service(&self) -> &ChartService {
        &self.chart_service
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store, e.g. to hand it to the next page load.
    pub fn into_store(self) -> S {
        self.store
    }
}
