//! Tests for template engine
//!
//! Organized by template shape, with shared fixtures in `helpers`.

use super::*;

// Test helper functions
mod helpers;

// Rendering tests
mod render_basic;
mod render_strings;

// Error and cache behaviour
mod cache;
