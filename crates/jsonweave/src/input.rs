use anyhow::{Context as _, Result};
use serde_json::Value;
use std::io;
use std::path::Path;

/// Path argument that stands for stdin
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read and parse a JSON file, or stdin for `-`
pub fn read_json(path: &Path) -> Result<Value> {
    let content = if is_stdin(path) {
        io::read_to_string(io::stdin().lock()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))
}
