use crate::errors::CoreError;

/// The slice of a page the dashboard touches: element lookup by id, the
/// `<body>` class list, element inner HTML and root `<html>` attributes.
pub trait Document {
    fn has_element(&self, id: &str) -> bool;

    fn body_has_class(&self, class: &str) -> bool;

    fn add_body_class(&mut self, class: &str);

    fn remove_body_class(&mut self, class: &str);

    /// Flip membership of `class` on `<body>` and report whether it is now present.
    fn toggle_body_class(&mut self, class: &str) -> bool {
        if self.body_has_class(class) {
            self.remove_body_class(class);
            false
        } else {
            self.add_body_class(class);
            true
        }
    }

    /// Replace the inner HTML of element `id`.
    fn set_inner_html(&mut self, id: &str, html: &str) -> Result<(), CoreError>;

    /// Attribute on the root `<html>` element.
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Fail with `MissingElement` unless element `id` exists.
    fn require_element(&self, id: &str) -> Result<(), CoreError> {
        if self.has_element(id) {
            Ok(())
        } else {
            Err(CoreError::MissingElement(id.to_string()))
        }
    }
}
