//! `ctxbuild buildcprj` command

use anyhow::{bail, Result};

use crate::cli::BuildCprjArgs;
use ctxbuild::builder::CprjBuilder;
use ctxbuild::{BuilderOptions, InstallConfig, ProcessRunner};

pub fn execute(args: BuildCprjArgs, quiet: bool) -> Result<()> {
    if !args.cprj.is_file() {
        bail!("project descriptor not found: {}", args.cprj.display());
    }

    let install = InstallConfig::resolve()?;

    let options = BuilderOptions {
        output_dir: args.output,
        intermediate_dir: args.intdir,
        clean: args.clean,
        quiet,
        ..BuilderOptions::default()
    };

    let output_dir = CprjBuilder::new(&ProcessRunner, &install, &options, &args.cprj).build()?;

    eprintln!(
        "    Finished `{}` -> {}",
        args.cprj.display(),
        output_dir.display()
    );

    Ok(())
}
