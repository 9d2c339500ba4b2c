//! Placeholder detection over whole template structures

use serde_json::Value;

use super::Renderer;
use crate::expr::ExpressionEngine;
use crate::query::QueryEngine;

impl<Q: QueryEngine, E: ExpressionEngine> Renderer<Q, E> {
    /// Whether `template` contains a placeholder anywhere (keys included)
    pub fn has_placeholder(&self, template: &Value) -> bool {
        match template {
            Value::String(text) => self.text_has_placeholder(text),
            Value::Array(items) => items.iter().any(|item| self.has_placeholder(item)),
            Value::Object(map) => map
                .iter()
                .any(|(key, value)| self.text_has_placeholder(key) || self.has_placeholder(value)),
            Value::Null | Value::Bool(_) | Value::Number(_) => false,
        }
    }

    pub(super) fn text_has_placeholder(&self, text: &str) -> bool {
        !self.text(text).is_literal()
    }

    /// Every placeholder in `template`, as written, in traversal order
    pub fn placeholders(&self, template: &Value) -> Vec<String> {
        let mut found = Vec::new();
        self.collect_placeholders(template, &mut found);
        found
    }

    fn collect_placeholders(&self, template: &Value, found: &mut Vec<String>) {
        match template {
            Value::String(text) => found.extend(self.text(text).placeholders()),
            Value::Array(items) => {
                for item in items {
                    self.collect_placeholders(item, found);
                }
            }
            Value::Object(map) => {
                for (key, value) in map {
                    found.extend(self.text(key).placeholders());
                    self.collect_placeholders(value, found);
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
}
