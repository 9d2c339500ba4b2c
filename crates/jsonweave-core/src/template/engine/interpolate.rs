//! Rendering of parsed text templates
//!
//! Single mode concatenates. List mode expands every placeholder and returns
//! the cartesian product of the results in row-major order: the first
//! placeholder varies slowest.

use serde_json::Value;

use super::{Renderer, Scope, Segment, TextTemplate};
use crate::error::Result;
use crate::expr::ExpressionEngine;
use crate::query::QueryEngine;
use crate::value::to_text;

impl<Q: QueryEngine, E: ExpressionEngine> Renderer<Q, E> {
    /// Single-mode value of a text template; `None` when a whole-value query matched nothing
    pub(super) fn render_text(&self, parsed: &TextTemplate, scope: Scope<'_>) -> Result<Option<Value>> {
        match parsed {
            TextTemplate::Literal(text) => Ok(Some(Value::String(text.clone()))),
            TextTemplate::Query { anchor, source } => self.resolve_single(*anchor, source, scope),
            TextTemplate::Interpolated(segments) => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        Segment::Literal(text) => out.push_str(text),
                        Segment::Placeholder { anchor, source } => {
                            if let Some(value) = self.resolve_single(*anchor, source, scope)? {
                                out.push_str(&to_text(&value));
                            }
                        }
                    }
                }
                Ok(Some(Value::String(out)))
            }
        }
    }

    /// Text coerced for use as a mapping key; an unmatched query is the empty key
    pub(super) fn render_key(&self, key: &str, scope: Scope<'_>) -> Result<String> {
        Ok(self
            .render_text(&self.text(key), scope)?
            .map(|value| to_text(&value))
            .unwrap_or_default())
    }

    pub(super) fn render_text_list(&self, parsed: &TextTemplate, scope: Scope<'_>) -> Result<Vec<Value>> {
        match parsed {
            TextTemplate::Literal(text) => Ok(vec![Value::String(text.clone())]),
            TextTemplate::Query { anchor, source } => self.resolve_list(*anchor, source, scope),
            TextTemplate::Interpolated(segments) => {
                let mut partials = vec![String::new()];
                for segment in segments {
                    match segment {
                        Segment::Literal(text) => {
                            for partial in &mut partials {
                                partial.push_str(text);
                            }
                        }
                        Segment::Placeholder { anchor, source } => {
                            let texts: Vec<String> = self
                                .resolve_list(*anchor, source, scope)?
                                .iter()
                                .map(to_text)
                                .collect();
                            partials = partials
                                .iter()
                                .flat_map(|partial| texts.iter().map(move |text| format!("{partial}{text}")))
                                .collect();
                        }
                    }
                }
                Ok(partials.into_iter().map(Value::String).collect())
            }
        }
    }
}
