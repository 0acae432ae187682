use std::collections::{BTreeSet, HashMap};

use super::traits::Document;
use crate::errors::CoreError;

/// A headless page: a set of element ids with their inner HTML, the body
/// class list and the root element's attributes.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, String>,
    body_classes: BTreeSet<String>,
    root_attributes: HashMap<String, String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with the given initial inner HTML.
    #[must_use]
    pub fn with_element(mut self, id: impl Into<String>, inner_html: impl Into<String>) -> Self {
        self.elements.insert(id.into(), inner_html.into());
        self
    }

    #[must_use]
    pub fn with_root_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.root_attributes.insert(name.into(), value.into());
        self
    }

    pub fn set_root_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.root_attributes.insert(name.into(), value.into());
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(String::as_str)
    }

    pub fn body_classes(&self) -> impl Iterator<Item = &str> {
        self.body_classes.iter().map(String::as_str)
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    fn add_body_class(&mut self, class: &str) {
        self.body_classes.insert(class.to_string());
    }

    fn remove_body_class(&mut self, class: &str) {
        self.body_classes.remove(class);
    }

    fn set_inner_html(&mut self, id: &str, html: &str) -> Result<(), CoreError> {
        let slot = self
            .elements
            .get_mut(id)
            .ok_or_else(|| CoreError::MissingElement(id.to_string()))?;
        *slot = html.to_string();
        Ok(())
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.get(name).cloned()
    }
}
