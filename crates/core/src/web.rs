//! Browser bindings (wasm32 only): `localStorage`, the live DOM and the
//! global Chart.js constructor.

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::traits::Document;
use crate::errors::CoreError;
use crate::models::chart::{ChartConfig, ChartHandle};
use crate::render::traits::ChartRenderer;
use crate::storage::traits::PreferenceStore;

#[wasm_bindgen]
extern "C" {
    /// The `Chart` class exposed by the Chart.js UMD bundle.
    #[wasm_bindgen(js_name = Chart)]
    type JsChart;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(context: &JsValue, config: &JsValue) -> Result<JsChart, JsValue>;
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn window() -> Result<web_sys::Window, CoreError> {
    web_sys::window().ok_or_else(|| CoreError::Storage("no global window".into()))
}

// ── localStorage ────────────────────────────────────────────────────

/// `window.localStorage`.
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    pub fn new() -> Result<Self, CoreError> {
        let storage = window()?
            .local_storage()
            .map_err(|e| CoreError::Storage(js_message(&e)))?
            .ok_or_else(|| CoreError::Storage("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn name(&self) -> &str {
        "localStorage"
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| CoreError::Storage(js_message(&e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CoreError::Storage(js_message(&e)))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), CoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| CoreError::Storage(js_message(&e)))
    }
}

// ── DOM ─────────────────────────────────────────────────────────────

/// The live page.
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new() -> Result<Self, CoreError> {
        let document = window()?
            .document()
            .ok_or_else(|| CoreError::MissingElement("document".into()))?;
        Ok(Self { document })
    }

    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }

    fn body_classes(&self) -> Option<web_sys::DomTokenList> {
        self.document.body().map(|b| b.class_list())
    }
}

impl Document for BrowserDocument {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn body_has_class(&self, class: &str) -> bool {
        self.body_classes().is_some_and(|list| list.contains(class))
    }

    fn add_body_class(&mut self, class: &str) {
        if let Some(list) = self.body_classes() {
            if let Err(e) = list.add_1(class) {
                warn!(class, error = %js_message(&e), "failed to add body class");
            }
        }
    }

    fn remove_body_class(&mut self, class: &str) {
        if let Some(list) = self.body_classes() {
            if let Err(e) = list.remove_1(class) {
                warn!(class, error = %js_message(&e), "failed to remove body class");
            }
        }
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> Result<(), CoreError> {
        let element = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| CoreError::MissingElement(id.to_string()))?;
        element.set_inner_html(html);
        Ok(())
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }
}

// ── Chart.js ────────────────────────────────────────────────────────

/// Draws on `<canvas>` elements through the page's Chart.js global.
/// Created chart objects are kept alive for the lifetime of the renderer.
pub struct ChartJsCanvasRenderer {
    document: web_sys::Document,
    charts: Vec<JsChart>,
}

impl ChartJsCanvasRenderer {
    pub fn new(document: &BrowserDocument) -> Self {
        Self {
            document: document.inner().clone(),
            charts: Vec::new(),
        }
    }

    fn error(&self, message: impl Into<String>) -> CoreError {
        CoreError::Render {
            renderer: self.name().to_string(),
            message: message.into(),
        }
    }
}

impl ChartRenderer for ChartJsCanvasRenderer {
    fn name(&self) -> &str {
        "chartjs-canvas"
    }

    fn create_chart(&mut self, config: &ChartConfig) -> Result<ChartHandle, CoreError> {
        let canvas = self
            .document
            .get_element_by_id(&config.canvas_id)
            .ok_or_else(|| CoreError::MissingElement(config.canvas_id.clone()))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| self.error(format!("#{} is not a canvas", config.canvas_id)))?;

        let context = canvas
            .get_context("2d")
            .map_err(|e| self.error(js_message(&e)))?
            .ok_or_else(|| self.error("2d context unavailable"))?;

        let json = config.to_library_json()?;
        let options = js_sys::JSON::parse(&json).map_err(|e| self.error(js_message(&e)))?;

        let chart = JsChart::new(context.as_ref(), &options).map_err(|e| self.error(js_message(&e)))?;
        self.charts.push(chart);
        Ok(ChartHandle::new(config, self.name()))
    }
}
