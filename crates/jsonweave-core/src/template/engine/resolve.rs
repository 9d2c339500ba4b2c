//! Placeholder resolution: run the query, then the optional expression

use serde_json::Value;
use std::sync::Arc;

use super::{Anchor, Renderer, Scope};
use crate::error::{RenderError, Result};
use crate::expr::{Bindings, ExpressionEngine};
use crate::query::{Match, QueryEngine};

/// Separates the query from the expression in `query => expression`
const EXPRESSION_SEPARATOR: &str = "=>";

/// A compiled `query => expression` pair
pub(super) struct Placeholder<P> {
    query: String,
    expression: Option<P>,
}

impl<P> Placeholder<P> {
    /// Exactly `$`: the anchored value itself, no query engine involved
    fn is_identity_query(&self) -> bool {
        self.query == "$"
    }
}

impl<Q: QueryEngine, E: ExpressionEngine> Renderer<Q, E> {
    fn placeholder(&self, source: &str) -> Result<Arc<Placeholder<E::Program>>> {
        self.placeholders
            .get_or_try_insert_with(source, || -> Result<Arc<Placeholder<E::Program>>> {
                tracing::trace!(source, "compiling placeholder");
                let (query, expression) = match source.split_once(EXPRESSION_SEPARATOR) {
                    Some((query, expression)) => (query.trim(), Some(expression.trim())),
                    None => (source.trim(), None),
                };
                let expression = expression
                    .map(|expression| self.expr.compile(expression))
                    .transpose()?;
                Ok(Arc::new(Placeholder {
                    query: query.to_string(),
                    expression,
                }))
            })
    }

    fn matches(
        &self,
        placeholder: &Placeholder<E::Program>,
        data: &Value,
        limit: Option<usize>,
    ) -> Result<Vec<Match>> {
        if placeholder.is_identity_query() {
            return Ok(vec![Match::root(data.clone())]);
        }

        self.query
            .select(data, &placeholder.query, limit)
            .map_err(|source| {
                tracing::debug!(query = %placeholder.query, error = %source, "query failed");
                RenderError::query(&placeholder.query, data, source)
            })
    }

    /// Apply the expression (identity when absent) to one match
    fn evaluate(
        &self,
        placeholder: &Placeholder<E::Program>,
        found: Match,
        root: &Value,
    ) -> Result<Value> {
        let Some(program) = &placeholder.expression else {
            return Ok(found.value);
        };

        let keys = found.keys();
        let bindings = Bindings {
            current: &found.value,
            root,
            keys: Some(&keys),
        };
        Ok(self.expr.evaluate(program, &bindings)?)
    }

    /// First match of a placeholder, or `None` when nothing matched
    pub(super) fn resolve_single(
        &self,
        anchor: Anchor,
        source: &str,
        scope: Scope<'_>,
    ) -> Result<Option<Value>> {
        let placeholder = self.placeholder(source)?;
        self.matches(&placeholder, scope.anchored(anchor), Some(1))?
            .into_iter()
            .next()
            .map(|found| self.evaluate(&placeholder, found, scope.root))
            .transpose()
    }

    /// Every match of a placeholder, in document order
    pub(super) fn resolve_list(
        &self,
        anchor: Anchor,
        source: &str,
        scope: Scope<'_>,
    ) -> Result<Vec<Value>> {
        let placeholder = self.placeholder(source)?;
        self.matches(&placeholder, scope.anchored(anchor), None)?
            .into_iter()
            .map(|found| self.evaluate(&placeholder, found, scope.root))
            .collect()
    }
}
