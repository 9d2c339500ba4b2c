//! Global context for CLI commands

use anyhow::{Context as _, Result};
use jsonweave_core::{RenderConfig, Renderer};
use std::path::Path;

/// Renderer built from the optional config file
pub struct Context {
    pub renderer: Renderer,
    pub verbose: bool,
}

impl Context {
    /// Load the config (defaults when no file is given) and build the renderer
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, parsed or validated
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let config = match config_path {
            Some(path) => RenderConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };
        let renderer = Renderer::from_config(&config)?;
        tracing::debug!(policy = ?renderer.policy(), "renderer ready");

        Ok(Self { renderer, verbose })
    }
}
