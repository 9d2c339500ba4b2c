// Core modules
pub mod cache;
pub mod config;
pub mod error;
pub mod expr;
pub mod query;
pub mod template;
mod value;

// Re-export commonly used types
pub use cache::{CachePolicy, CacheStats, MemoCache};
pub use config::RenderConfig;
pub use error::{RenderError, Result};
pub use template::{has_placeholder, render, Arity, Rendered, Renderer, Scope};
