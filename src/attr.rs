//! Attributes of rendered elements
//!
//! Plain `Vec<(String, String)>` in insertion order; block elements carry a
//! handful of attributes, so linear lookup is fine. Class lists are built up
//! incrementally by the block renderers, hence the class helpers.

/// Element attributes as ordered key-value pairs
pub type Attrs = Vec<(String, String)>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Append space-separated class names to `class`, skipping empty input
    fn add_class(&mut self, class: &str);

    /// Check whether `class` contains the given class name
    fn has_class(&self, class: &str) -> bool;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn add_class(&mut self, class: &str) {
        let class = class.trim();
        if class.is_empty() {
            return;
        }
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == "class") {
            if !attr.1.is_empty() {
                attr.1.push(' ');
            }
            attr.1.push_str(class);
        } else {
            self.push(("class".to_string(), class.to_string()));
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

// =============================================================================
// Tests
// =============================================================================
