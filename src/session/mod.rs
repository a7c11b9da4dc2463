//! Variable-fill session for a single template.

use crate::template::{self, VariableValues};

/// Holds the values typed for one template and its live-rendered preview.
///
/// A session is only meaningful for content with at least one variable;
/// [`FillSession::start`] returns `None` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct FillSession {
    content: String,
    variables: Vec<String>,
    values: VariableValues,
    rendered: String,
}

impl FillSession {
    pub fn start(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        let variables = template::extract(&content);
        if variables.is_empty() {
            return None;
        }

        let values = VariableValues::new();
        let rendered = template::render(&content, &values);
        Some(Self {
            content,
            variables,
            values,
            rendered,
        })
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The variable that receives focus when the session starts.
    pub fn first_variable(&self) -> &str {
        // `start` guarantees at least one variable.
        &self.variables[0]
    }

    pub fn value(&self, identifier: &str) -> &str {
        self.values.get(identifier).map(String::as_str).unwrap_or("")
    }

    #[cfg(test)]
    pub fn values(&self) -> &VariableValues {
        &self.values
    }

    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Set the value of a known variable. Unknown identifiers are ignored.
    pub fn set_value(&mut self, identifier: &str, text: impl Into<String>) {
        if !self.variables.iter().any(|name| name == identifier) {
            return;
        }
        self.values.insert(identifier.to_string(), text.into());
        self.rendered = template::render(&self.content, &self.values);
    }

    /// Accept whatever is currently rendered, filled or not.
    pub fn complete(&self) -> String {
        self.rendered.clone()
    }
}
