//! Test utilities for jsonweave
//!
//! Shared fixtures for the jsonweave workspace: scratch directories under
//! `.tmp/` and helpers that write template, data and config files into them.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// # Returns
///
/// A `TempDir` that removes itself on drop, at `.tmp/<random-name>`
/// relative to the current directory.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use jsonweave_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("template.json");
/// std::fs::write(&file_path, "\"$.name\"").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let tmp_base = std::env::current_dir()?.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Write `value` as JSON to `dir/name` and return the file path
///
/// # Panics
///
/// Panics if the file cannot be written
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let content = serde_json::to_string_pretty(value).expect("JSON values always serialize");
    write_text(dir, name, &content)
}

/// Write raw text to `dir/name` and return the file path
///
/// Used for config files and for deliberately broken JSON.
///
/// # Panics
///
/// Panics if the file cannot be written
pub fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    path
}
