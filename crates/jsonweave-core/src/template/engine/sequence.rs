//! Sequence templates and the selector/sub-template pairing rule

use serde_json::Value;
use std::borrow::Cow;

use super::{Renderer, Scope};
use crate::error::Result;
use crate::expr::ExpressionEngine;
use crate::query::QueryEngine;

impl<Q: QueryEngine, E: ExpressionEngine> Renderer<Q, E> {
    /// Render a sequence left to right
    ///
    /// - element without placeholder: copied
    /// - placeholder element followed by another placeholder element: the
    ///   first is a selector (list mode), the second a sub-template rendered
    ///   once per selected item, with that item as data
    /// - any other placeholder element: rendered in list mode and spliced in
    ///
    /// Pairing is greedy, so `[A, B, C]` with three placeholder elements is
    /// the pair `(A, B)` followed by the standalone `C`.
    pub(super) fn render_sequence<'t>(
        &self,
        template: &'t Value,
        items: &'t [Value],
        scope: Scope<'_>,
    ) -> Result<Cow<'t, Value>> {
        if items.is_empty() || !self.has_placeholder(template) {
            return Ok(Cow::Borrowed(template));
        }

        let mut out = Vec::with_capacity(items.len());
        let mut i = 0;
        while i < items.len() {
            let item = &items[i];
            if !self.has_placeholder(item) {
                out.push(item.clone());
                i += 1;
                continue;
            }

            match items.get(i + 1).filter(|next| self.has_placeholder(next)) {
                Some(sub_template) => {
                    for context in self.render_many(item, scope)? {
                        let rendered = self.render_single(sub_template, scope.enter(&context))?;
                        out.push(rendered.into_owned());
                    }
                    i += 2;
                }
                None => {
                    out.extend(self.render_many(item, scope)?);
                    i += 1;
                }
            }
        }

        Ok(Cow::Owned(Value::Array(out)))
    }
}
