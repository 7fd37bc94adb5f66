//! `ctxbuild list` command

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{ListArgs, ListCommands};
use ctxbuild::{BuilderOptions, BuilderParams, InstallConfig, ProcessRunner, SolutionBuilder};

pub fn execute(args: ListArgs) -> Result<()> {
    let install = InstallConfig::resolve()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let builder = |solution: Option<PathBuf>, filter: String, schema: bool| {
        SolutionBuilder::new(BuilderParams {
            runner: Arc::new(ProcessRunner),
            input_file: solution.unwrap_or_default(),
            options: BuilderOptions {
                filter,
                schema,
                ..BuilderOptions::default()
            },
            install: install.clone(),
        })
    };

    match args.command {
        ListCommands::Contexts(a) => builder(a.solution, a.filter, a.schema).report_contexts(&mut out)?,
        ListCommands::Toolchains(a) => {
            builder(a.solution, a.filter, a.schema).report_toolchains(&mut out)?
        }
        ListCommands::Packs(a) => {
            builder(a.solution, a.filter, a.schema).report_packs(&mut out, a.missing)?
        }
        ListCommands::Environment => {
            builder(None, String::new(), false).report_environment(&mut out)?
        }
    }

    out.flush()?;
    Ok(())
}
