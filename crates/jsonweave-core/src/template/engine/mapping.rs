//! Mapping templates: dynamic keys and the `@` broadcast

use serde_json::{Map, Value};
use std::borrow::Cow;

use super::{Renderer, Scope};
use crate::error::Result;
use crate::expr::ExpressionEngine;
use crate::query::QueryEngine;

/// Reserved key: render the rest of the mapping once per item of its value
pub const BROADCAST_KEY: &str = "@";

impl<Q: QueryEngine, E: ExpressionEngine> Renderer<Q, E> {
    pub(super) fn render_mapping<'t>(
        &self,
        template: &'t Value,
        map: &'t Map<String, Value>,
        scope: Scope<'_>,
    ) -> Result<Cow<'t, Value>> {
        if map.is_empty() || !self.has_placeholder(template) {
            return Ok(Cow::Borrowed(template));
        }

        let out = match map.get(BROADCAST_KEY) {
            Some(selector) => self.render_broadcast(selector, map, scope)?,
            None => self.render_entries(map, scope)?,
        };
        Ok(Cow::Owned(Value::Object(out)))
    }

    /// Merge the per-item renderings of the mapping without `@`; later items win
    fn render_broadcast(
        &self,
        selector: &Value,
        map: &Map<String, Value>,
        scope: Scope<'_>,
    ) -> Result<Map<String, Value>> {
        let rest: Map<String, Value> = map
            .iter()
            .filter(|(key, _)| key.as_str() != BROADCAST_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let rest = Value::Object(rest);

        let mut out = Map::new();
        for item in self.render_many(selector, scope)? {
            if let Value::Object(rendered) = self.render_single(&rest, scope.enter(&item))?.into_owned() {
                out.extend(rendered);
            }
        }
        Ok(out)
    }

    fn render_entries(&self, map: &Map<String, Value>, scope: Scope<'_>) -> Result<Map<String, Value>> {
        let mut out = Map::new();
        for (key, value) in map {
            let key = if self.text_has_placeholder(key) {
                self.render_key(key, scope)?
            } else {
                key.clone()
            };
            let value = if self.has_placeholder(value) {
                self.render_single(value, scope)?.into_owned()
            } else {
                value.clone()
            };
            out.insert(key, value);
        }
        Ok(out)
    }
}
