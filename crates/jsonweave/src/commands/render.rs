//! Render command - render a template against JSON data

use crate::context::Context;
use crate::input::{is_stdin, read_json};
use crate::output::print_json;
use anyhow::{Result, bail};
use colored::Colorize;
use jsonweave_core::{Arity, Scope};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Arguments of `jsonweave render`
pub struct RenderArgs {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub list: bool,
    pub pretty: bool,
}

/// Render a template and print the result to stdout
///
/// # Arguments
///
/// * `args` - Template, data and output options
/// * `config` - Optional renderer settings file
/// * `verbose` - Report cache statistics on stderr if true
///
/// # Errors
///
/// Fails on unreadable inputs, invalid JSON, an invalid config or any
/// render error (malformed query or expression, unsupported shape)
pub fn run(args: RenderArgs, config: Option<&Path>, verbose: bool) -> Result<()> {
    check_single_stdin(&args)?;
    let ctx = Context::new(config, verbose)?;

    let template = read_json(&args.template)?;
    let data = match &args.data {
        Some(path) => read_json(path)?,
        None => Value::Null,
    };
    let root_data;
    let root = match &args.root {
        Some(path) => {
            root_data = read_json(path)?;
            &root_data
        }
        None => &data,
    };

    let arity = if args.list { Arity::List } else { Arity::Single };
    let rendered = ctx
        .renderer
        .render_scoped(&template, Scope::with_root(&data, root), arity)?
        .into_value();

    let text = if args.pretty {
        serde_json::to_string_pretty(&rendered)?
    } else {
        serde_json::to_string(&rendered)?
    };
    print_json(&text)?;

    if ctx.verbose {
        let stats = ctx.renderer.stats();
        eprintln!(
            "{} {} text templates ({} hits), {} placeholders ({} hits)",
            "→".cyan(),
            stats.texts.entries,
            stats.texts.hits,
            stats.placeholders.entries,
            stats.placeholders.hits
        );
    }

    Ok(())
}

fn check_single_stdin(args: &RenderArgs) -> Result<()> {
    let from_stdin = std::iter::once(Some(&args.template))
        .chain([args.data.as_ref(), args.root.as_ref()])
        .flatten()
        .filter(|path| is_stdin(path))
        .count();
    if from_stdin > 1 {
        bail!("Only one input can be read from stdin");
    }
    Ok(())
}
