mod cli;
mod commands;
mod context;
mod input;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::prelude::*;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Render {
            template,
            data,
            root,
            list,
            pretty,
        } => commands::render::run(
            commands::render::RenderArgs {
                template,
                data,
                root,
                list,
                pretty,
            },
            config,
            cli.verbose,
        ),
        Commands::Inspect { template, json } => {
            commands::inspect::run(&template, json, config, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; stdout carries the rendered JSON
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
