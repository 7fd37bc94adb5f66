//! `ctxbuild build` command

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::cli::BuildArgs;
use ctxbuild::util::config::{global_config_path, load_config, project_config_path};
use ctxbuild::{BuilderOptions, BuilderParams, InstallConfig, ProcessRunner, SolutionBuilder};

pub fn execute(args: BuildArgs, quiet: bool) -> Result<()> {
    if !args.solution.is_file() {
        bail!("solution file not found: {}", args.solution.display());
    }

    let install = InstallConfig::resolve()?;

    let mut options = BuilderOptions {
        contexts: args.contexts,
        filter: args.filter,
        schema: args.schema,
        packs: args.packs,
        output_dir: args.output,
        intermediate_dir: args.intdir,
        fail_fast: args.fail_fast,
        clean: args.clean,
        quiet,
        ..BuilderOptions::default()
    };

    // Load configuration (global + project); CLI flags win
    let global = global_config_path();
    let config = load_config(global.as_deref(), &project_config_path(&args.solution));
    config.apply_to(&mut options, args.jobs);

    let builder = SolutionBuilder::new(BuilderParams {
        runner: Arc::new(ProcessRunner),
        input_file: args.solution,
        options,
        install,
    });

    let summary = builder.build()?;

    for (context, output_dir) in &summary.built {
        eprintln!("    Finished `{}` -> {}", context, output_dir.display());
    }

    Ok(())
}
