//! Renderer configuration loaded from TOML

mod model;

pub use model::{CacheConfig, CacheMode, RenderConfig};
