//! ctxbuild CLI - build front end for csolution projects

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    init_logging(cli.quiet, cli.debug, cli.log.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, cli.quiet),
        Commands::Buildcprj(args) => commands::buildcprj::execute(args, cli.quiet),
        Commands::List(args) => commands::list::execute(args),
    }
}

fn init_logging(quiet: bool, debug: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if quiet {
        "error"
    } else if debug {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::new(format!("ctxbuild={}", level));

    let writer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file: {}", path.display()))?;
            BoxMakeWriter::new(std::io::stderr.and(Mutex::new(file)))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .with_target(false)
        .without_time()
        .init();

    Ok(())
}
