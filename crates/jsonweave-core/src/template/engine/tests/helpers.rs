//! Shared test helpers for template engine tests

use serde_json::{json, Value};

/// A small bookstore with nested arrays and mixed scalar types
pub(super) fn store() -> Value {
    json!({
        "name": "Corner Books",
        "open": true,
        "books": [
            {"title": "Dune", "author": "Herbert", "price": 9.5, "tags": ["scifi", "classic"]},
            {"title": "Emma", "author": "Austen", "price": 4, "tags": ["romance"]},
            {"title": "Ubik", "author": "Dick", "price": 7.25, "tags": []}
        ],
        "currency": "EUR"
    })
}

/// Two lists for combination tests
pub(super) fn grid() -> Value {
    json!({
        "rows": ["a", "b"],
        "cols": [1, 2, 3]
    })
}
