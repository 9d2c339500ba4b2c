//! Template engine implementation

mod detect;
mod interpolate;
mod mapping;
mod parse;
mod resolve;
mod sequence;

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;

use crate::cache::{CachePolicy, CacheStats, MemoCache};
use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::expr::{ExpressionEngine, ScriptEngine};
use crate::query::{JsonPathEngine, QueryEngine};

pub use parse::{Anchor, Segment, TextTemplate};
use resolve::Placeholder;

/// Whether a placeholder yields its first match or every match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    #[default]
    Single,
    List,
}

/// Result of [`Renderer::render_scoped`], shaped by the requested arity
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Single(Value),
    List(Vec<Value>),
}

impl Rendered {
    /// Flatten into a JSON value (a list becomes an array)
    pub fn into_value(self) -> Value {
        match self {
            Rendered::Single(value) => value,
            Rendered::List(items) => Value::Array(items),
        }
    }
}

/// The data a render call resolves against
///
/// `root` is fixed by the outermost call; nested calls only replace `data`.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub data: &'a Value,
    pub root: &'a Value,
}

impl<'a> Scope<'a> {
    /// Outermost scope: the data is its own root
    pub fn new(data: &'a Value) -> Self {
        Self { data, root: data }
    }

    pub fn with_root(data: &'a Value, root: &'a Value) -> Self {
        Self { data, root }
    }

    /// Scope for a nested render over `data`, keeping the root
    fn enter<'b>(self, data: &'b Value) -> Scope<'b>
    where
        'a: 'b,
    {
        Scope {
            data,
            root: self.root,
        }
    }

    fn anchored(self, anchor: Anchor) -> &'a Value {
        match anchor {
            Anchor::Context => self.data,
            Anchor::Root => self.root,
        }
    }
}

/// Runtime shape of a template value
#[derive(Debug, Clone, Copy)]
pub enum TemplateKind<'t> {
    /// `null`, passed through untouched
    Sentinel,
    Scalar(&'t Value),
    Text(&'t str),
    Sequence(&'t [Value]),
    Mapping(&'t Map<String, Value>),
}

impl<'t> TemplateKind<'t> {
    pub fn of(template: &'t Value) -> Self {
        match template {
            Value::Null => TemplateKind::Sentinel,
            Value::Bool(_) | Value::Number(_) => TemplateKind::Scalar(template),
            Value::String(text) => TemplateKind::Text(text),
            Value::Array(items) => TemplateKind::Sequence(items),
            Value::Object(map) => TemplateKind::Mapping(map),
        }
    }
}

/// Cache counters of a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RendererStats {
    pub texts: CacheStats,
    pub placeholders: CacheStats,
}

/// Template renderer over pluggable query and expression engines
///
/// Parsed text templates and compiled placeholders are memoized by their text,
/// so one renderer should be reused across calls.
pub struct Renderer<Q = JsonPathEngine, E = ScriptEngine>
where
    E: ExpressionEngine,
{
    query: Q,
    expr: E,
    texts: MemoCache<Arc<TextTemplate>>,
    placeholders: MemoCache<Arc<Placeholder<E::Program>>>,
}

impl Renderer {
    /// Renderer with the default engines and unbounded caches
    pub fn new() -> Self {
        Self::with_policy(CachePolicy::default())
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self::with_engines(JsonPathEngine::with_policy(policy), ScriptEngine, policy)
    }

    pub fn from_config(config: &RenderConfig) -> Result<Self> {
        Ok(Self::with_policy(config.cache.policy()?))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: QueryEngine, E: ExpressionEngine> Renderer<Q, E> {
    pub fn with_engines(query: Q, expr: E, policy: CachePolicy) -> Self {
        Self {
            query,
            expr,
            texts: MemoCache::new(policy),
            placeholders: MemoCache::new(policy),
        }
    }

    pub fn query_engine(&self) -> &Q {
        &self.query
    }

    pub fn policy(&self) -> CachePolicy {
        self.texts.policy()
    }

    pub fn stats(&self) -> RendererStats {
        RendererStats {
            texts: self.texts.stats(),
            placeholders: self.placeholders.stats(),
        }
    }

    /// Render `template` against `data`, which is also the root
    pub fn render(&self, template: &Value, data: &Value) -> Result<Value> {
        Ok(self.render_cow(template, Scope::new(data))?.into_owned())
    }

    /// Render `template` against `data` in list mode
    pub fn render_list(&self, template: &Value, data: &Value) -> Result<Vec<Value>> {
        match self.render_scoped(template, Scope::new(data), Arity::List)? {
            Rendered::List(items) => Ok(items),
            Rendered::Single(value) => Ok(vec![value]),
        }
    }

    /// Single-mode render that borrows the template when it has no placeholder
    pub fn render_cow<'t>(&self, template: &'t Value, scope: Scope<'_>) -> Result<Cow<'t, Value>> {
        tracing::debug!(arity = ?Arity::Single, "rendering template");
        self.render_single(template, scope)
    }

    pub fn render_scoped(&self, template: &Value, scope: Scope<'_>, arity: Arity) -> Result<Rendered> {
        tracing::debug!(?arity, "rendering template");
        match arity {
            Arity::Single => Ok(Rendered::Single(self.render_single(template, scope)?.into_owned())),
            Arity::List => Ok(Rendered::List(self.render_many(template, scope)?)),
        }
    }

    /// Parsed form of a string, cached by its text
    fn text(&self, text: &str) -> Arc<TextTemplate> {
        self.texts
            .get_or_insert_with(text, || Arc::new(TextTemplate::parse(text)))
    }

    fn render_single<'t>(&self, template: &'t Value, scope: Scope<'_>) -> Result<Cow<'t, Value>> {
        match TemplateKind::of(template) {
            TemplateKind::Sentinel | TemplateKind::Scalar(_) => Ok(Cow::Borrowed(template)),
            TemplateKind::Text(text) => {
                let parsed = self.text(text);
                match &*parsed {
                    TextTemplate::Literal(unescaped) if unescaped == text => Ok(Cow::Borrowed(template)),
                    _ => Ok(Cow::Owned(
                        self.render_text(&parsed, scope)?.unwrap_or(Value::Null),
                    )),
                }
            }
            TemplateKind::Sequence(items) => self.render_sequence(template, items, scope),
            TemplateKind::Mapping(map) => self.render_mapping(template, map, scope),
        }
    }

    fn render_many(&self, template: &Value, scope: Scope<'_>) -> Result<Vec<Value>> {
        match TemplateKind::of(template) {
            TemplateKind::Sentinel | TemplateKind::Scalar(_) => Ok(vec![template.clone()]),
            TemplateKind::Text(text) => self.render_text_list(&self.text(text), scope),
            TemplateKind::Sequence(items) => {
                match self.render_sequence(template, items, scope)?.into_owned() {
                    Value::Array(rendered) => Ok(rendered),
                    other => Ok(vec![other]),
                }
            }
            TemplateKind::Mapping(_) if !self.has_placeholder(template) => Ok(vec![template.clone()]),
            TemplateKind::Mapping(_) => Err(RenderError::Unsupported(
                "rendering a mapping template in list mode",
            )),
        }
    }
}

/// Render `template` against `data` with a fresh default renderer
pub fn render(template: &Value, data: &Value) -> Result<Value> {
    Renderer::new().render(template, data)
}

/// Whether `template` contains a placeholder anywhere in its structure
pub fn has_placeholder(template: &Value) -> bool {
    Renderer::new().has_placeholder(template)
}

#[cfg(test)]
mod tests;
