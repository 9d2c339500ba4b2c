//! Inspect command - list the placeholders of a template

use crate::context::Context;
use crate::input::read_json;
use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::Path;

/// Report whether a template has placeholders, and which
pub fn run(template_path: &Path, json: bool, config: Option<&Path>, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let template = read_json(template_path)?;

    let has_placeholder = ctx.renderer.has_placeholder(&template);
    let placeholders = ctx.renderer.placeholders(&template);

    if json {
        let output = json!({
            "has_placeholder": has_placeholder,
            "placeholders": placeholders,
        });
        print_json(&serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    if !has_placeholder {
        print_text(&format!(
            "{} No placeholders: the template renders to itself",
            "✓".green()
        ))?;
        return Ok(());
    }

    print_text(&format!(
        "{} {} placeholder(s)",
        "→".cyan(),
        placeholders.len()
    ))?;
    for placeholder in &placeholders {
        print_text(&format!("  {}", placeholder.bold()))?;
    }
    Ok(())
}
