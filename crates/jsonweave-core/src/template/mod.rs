//! Template module - Declarative JSON template rendering
//!
//! A template is any JSON value. Strings inside it may carry placeholders
//! that are resolved against the data; everything else keeps its shape.
//!
//! ## Syntax
//!
//! - Whole-value placeholder: `"$.path"` (current data) or `"$$.path"` (root data)
//! - Expression suffix: `"$.price => $ * 1.2"` evaluates an expression per match
//! - Text placeholders: `"Hello {{ $.name }}"` (spaces optional)
//! - Escape: `"\\$5"` or `"{{ \\$.name }}"` renders the `$` literally
//! - Sequences: `["$.items[*]", {"name": "$.name"}]` renders the second element once per match of the first
//! - Broadcast: `{"@": "$.items[*]", "...": ...}` renders the rest of the mapping per match, merging the results
//!
//! ## Arity
//!
//! In single mode a placeholder yields its first match (`null` when nothing
//! matches). In list mode it yields every match, and text with several
//! placeholders expands to every combination of their results.

pub mod engine;

pub use engine::{
    has_placeholder, render, Anchor, Arity, Rendered, Renderer, RendererStats, Scope, Segment,
    TemplateKind, TextTemplate,
};
