//! Query collaborator: match a path query against a JSON value
//!
//! The renderer never interprets query syntax itself. It hands the query text
//! to a [`QueryEngine`] and gets back the matched locations in document order.
//! [`JsonPathEngine`] is the default engine (RFC 9535 JSONPath).

use serde_json::Value;
use serde_json_path::{JsonPath, PathElement};
use std::sync::Arc;
use thiserror::Error;

use crate::cache::{CachePolicy, MemoCache};

/// Failure reported by a query engine (invalid syntax or evaluation failure)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct QueryError {
    message: String,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One step of a matched location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    fn to_value(&self) -> Value {
        match self {
            PathSegment::Key(key) => Value::String(key.clone()),
            PathSegment::Index(index) => Value::from(*index),
        }
    }
}

impl From<&PathElement<'_>> for PathSegment {
    fn from(element: &PathElement<'_>) -> Self {
        match element {
            PathElement::Name(name) => PathSegment::Key(name.to_string()),
            PathElement::Index(index) => PathSegment::Index(*index),
        }
    }
}

/// A matched location paired with the value found there
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub path: Vec<PathSegment>,
    pub value: Value,
}

impl Match {
    /// The match for the query root itself (empty path)
    pub fn root(value: Value) -> Self {
        Self {
            path: Vec::new(),
            value,
        }
    }

    /// Path as bound to `$keys`: `["$", step, step, ...]`
    pub fn keys(&self) -> Value {
        std::iter::once(Value::String("$".to_string()))
            .chain(self.path.iter().map(PathSegment::to_value))
            .collect()
    }
}

/// Matches query text against JSON values
pub trait QueryEngine: Send + Sync {
    /// Return the matches of `query` in `data`, in document order
    ///
    /// `limit` caps the number of matches returned (`Some(1)` for single results).
    fn select(&self, data: &Value, query: &str, limit: Option<usize>)
        -> Result<Vec<Match>, QueryError>;
}

/// JSONPath query engine with memoized path compilation
#[derive(Debug)]
pub struct JsonPathEngine {
    compiled: MemoCache<Arc<JsonPath>>,
}

impl JsonPathEngine {
    pub fn new() -> Self {
        Self::with_policy(CachePolicy::default())
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            compiled: MemoCache::new(policy),
        }
    }

    /// Cache of compiled paths (for inspection)
    pub fn cache(&self) -> &MemoCache<Arc<JsonPath>> {
        &self.compiled
    }

    fn compile(&self, query: &str) -> Result<Arc<JsonPath>, QueryError> {
        self.compiled.get_or_try_insert_with(query, || {
            tracing::trace!(query, "compiling JSONPath");
            JsonPath::parse(query)
                .map(Arc::new)
                .map_err(|e| QueryError::new(e.to_string()))
        })
    }
}

impl Default for JsonPathEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEngine for JsonPathEngine {
    fn select(
        &self,
        data: &Value,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Match>, QueryError> {
        let path = self.compile(query)?;
        let located = path.query_located(data);

        Ok(located
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|node| Match {
                path: node.location().iter().map(PathSegment::from).collect(),
                value: node.node().clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> Value {
        json!({
            "store": {
                "book": [
                    {"title": "Sayings", "price": 8.95},
                    {"title": "Sword", "price": 12.99},
                    {"title": "Moby Dick", "price": 8.99}
                ]
            }
        })
    }

    #[test]
    fn test_select_all_matches_in_order() {
        let engine = JsonPathEngine::new();
        let matches = engine
            .select(&store(), "$.store.book[*].title", None)
            .unwrap();
        let titles: Vec<&Value> = matches.iter().map(|m| &m.value).collect();
        assert_eq!(titles, vec![&json!("Sayings"), &json!("Sword"), &json!("Moby Dick")]);
    }

    #[test]
    fn test_select_respects_limit() {
        let engine = JsonPathEngine::new();
        let matches = engine
            .select(&store(), "$.store.book[*].title", Some(1))
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, json!("Sayings"));
    }

    #[test]
    fn test_select_reports_paths() {
        let engine = JsonPathEngine::new();
        let matches = engine.select(&store(), "$.store.book[1].price", None).unwrap();
        assert_eq!(
            matches[0].path,
            vec![
                PathSegment::Key("store".to_string()),
                PathSegment::Key("book".to_string()),
                PathSegment::Index(1),
                PathSegment::Key("price".to_string()),
            ]
        );
        assert_eq!(matches[0].keys(), json!(["$", "store", "book", 1, "price"]));
    }

    #[test]
    fn test_select_no_match_is_empty() {
        let engine = JsonPathEngine::new();
        let matches = engine.select(&store(), "$.nothing", None).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_invalid_query_is_error() {
        let engine = JsonPathEngine::new();
        let err = engine.select(&store(), "$.store[", None).unwrap_err();
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_compiled_paths_are_cached() {
        let engine = JsonPathEngine::new();
        engine.select(&store(), "$.store", None).unwrap();
        engine.select(&json!({"store": 1}), "$.store", None).unwrap();
        assert_eq!(engine.cache().len(), 1);
        assert_eq!(engine.cache().stats().hits, 1);
    }

    #[test]
    fn test_root_match_keys() {
        assert_eq!(Match::root(json!(1)).keys(), json!(["$"]));
    }
}
