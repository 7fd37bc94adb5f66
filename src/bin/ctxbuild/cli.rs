//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// ctxbuild - build front end for csolution projects
#[derive(Parser)]
#[command(name = "ctxbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub quiet: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Also write log output to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the contexts of a solution
    Build(BuildArgs),

    /// Build a single project descriptor (.cprj)
    Buildcprj(BuildCprjArgs),

    /// List contexts, toolchains, packs or the environment
    List(ListArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Solution file (*.csolution.yml)
    pub solution: PathBuf,

    /// Context to build (repeatable; defaults to all)
    #[arg(short, long = "context", value_name = "CONTEXT")]
    pub contexts: Vec<String>,

    /// Only build contexts containing this text
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Validate solution files against their schema
    #[arg(long)]
    pub schema: bool,

    /// Install missing packs before building
    #[arg(short, long)]
    pub packs: bool,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Intermediate directory
    #[arg(long, value_name = "DIR")]
    pub intdir: Option<PathBuf>,

    /// Number of contexts to build in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Stop after the first failed context
    #[arg(long)]
    pub fail_fast: bool,

    /// Remove intermediate files before building
    #[arg(short = 'C', long)]
    pub clean: bool,
}

#[derive(Args)]
pub struct BuildCprjArgs {
    /// Project descriptor (*.cprj)
    pub cprj: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Intermediate directory
    #[arg(long, value_name = "DIR")]
    pub intdir: Option<PathBuf>,

    /// Remove intermediate files before building
    #[arg(short = 'C', long)]
    pub clean: bool,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(subcommand)]
    pub command: ListCommands,
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// List the contexts of a solution
    Contexts(ListSolutionArgs),

    /// List the toolchains csolution can use
    Toolchains(ListSolutionArgs),

    /// List the packs a solution uses
    Packs(ListPacksArgs),

    /// List the build environment
    Environment,
}

#[derive(Args)]
pub struct ListSolutionArgs {
    /// Solution file (*.csolution.yml)
    pub solution: Option<PathBuf>,

    /// Only list entries containing this text
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Validate solution files against their schema
    #[arg(long)]
    pub schema: bool,
}

#[derive(Args)]
pub struct ListPacksArgs {
    /// Solution file (*.csolution.yml)
    pub solution: Option<PathBuf>,

    /// Only list packs containing this text
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Only list packs that are not installed
    #[arg(short, long)]
    pub missing: bool,

    /// Validate solution files against their schema
    #[arg(long)]
    pub schema: bool,
}
