//! Implementation of `ctxbuild build`.
//!
//! Each selected context runs through generate → install packs → build.
//! Contexts are independent: one failing does not stop the others unless
//! fail-fast is set, and the run reports once every context has finished.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::builder::CprjBuilder;
use crate::core::build_index::get_cprj_file_path;
use crate::core::errors::{BuildError, ContextFailure, Result, Stage};
use crate::ops::packs::PackLedger;
use crate::ops::SolutionBuilder;

/// Outcome of one context's pipeline.
#[derive(Debug)]
pub enum ContextOutcome {
    /// Built into the given output directory.
    Built { output_dir: PathBuf },
    /// Failed at `stage`.
    Failed { stage: Stage, error: BuildError },
    /// Not started because an earlier context failed under fail-fast.
    Skipped,
}

/// Contexts built by a successful run, in selection order.
#[derive(Debug)]
pub struct BuildSummary {
    pub built: Vec<(String, PathBuf)>,
}

impl SolutionBuilder {
    /// Build the selected contexts.
    ///
    /// Succeeds only if every context built. Otherwise returns
    /// [`BuildError::ContextsFailed`] naming each failed context in
    /// selection order.
    pub fn build(&self) -> Result<BuildSummary> {
        self.params.install.validate()?;
        let contexts = self.resolve_contexts()?;

        tracing::info!("Building {} context(s)", contexts.len());

        let outcomes = self.run_pipelines(&contexts);

        let mut built = Vec::new();
        let mut failures = Vec::new();
        for (context, outcome) in contexts.into_iter().zip(outcomes) {
            match outcome {
                ContextOutcome::Built { output_dir } => built.push((context, output_dir)),
                ContextOutcome::Failed { stage, error } => failures.push(ContextFailure {
                    context,
                    stage,
                    error,
                }),
                ContextOutcome::Skipped => tracing::warn!("Skipped {}", context),
            }
        }

        if failures.is_empty() {
            Ok(BuildSummary { built })
        } else {
            Err(BuildError::ContextsFailed { failures })
        }
    }

    /// Run every context's pipeline, on a pool of `jobs` workers when
    /// more than one is configured.
    ///
    /// Outcomes come back in the order of `contexts`.
    fn run_pipelines(&self, contexts: &[String]) -> Vec<ContextOutcome> {
        let options = &self.params.options;
        let ledger = PackLedger::default();
        let abort = AtomicBool::new(false);

        let pb = if options.quiet || contexts.len() < 2 {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(contexts.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        };

        let run_one = |context: &String| {
            if abort.load(Ordering::SeqCst) {
                return ContextOutcome::Skipped;
            }

            let outcome = self.run_pipeline(context, &ledger);
            if let ContextOutcome::Failed { stage, error } = &outcome {
                tracing::error!("{} failed at {}: {}", context, stage, error);
                if options.fail_fast {
                    abort.store(true, Ordering::SeqCst);
                }
            }

            pb.set_message(context.clone());
            pb.inc(1);
            outcome
        };

        let pool = if options.jobs > 1 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(options.jobs)
                .build()
                .map_err(|e| tracing::warn!("building sequentially: {}", e))
                .ok()
        } else {
            None
        };

        let outcomes = match pool {
            Some(pool) => pool.install(|| contexts.par_iter().map(run_one).collect()),
            None => contexts.iter().map(run_one).collect(),
        };

        pb.finish_and_clear();
        outcomes
    }

    /// Generate, install packs and build one context.
    fn run_pipeline(&self, context: &str, ledger: &PackLedger) -> ContextOutcome {
        if let Err(error) = self.generate(context) {
            return ContextOutcome::Failed {
                stage: Stage::Generate,
                error,
            };
        }

        if self.params.options.packs {
            if let Err(error) = self.install_missing_packs_for(Some(context), ledger) {
                return ContextOutcome::Failed {
                    stage: Stage::InstallPacks,
                    error,
                };
            }
        }

        match self.build_context(context) {
            Ok(output_dir) => {
                tracing::debug!("built {} into {}", context, output_dir.display());
                ContextOutcome::Built { output_dir }
            }
            Err(error) => ContextOutcome::Failed {
                stage: Stage::Build,
                error,
            },
        }
    }

    /// `csolution convert` for one context.
    fn generate(&self, context: &str) -> Result<()> {
        tracing::info!("Generating {}", context);

        let csolution = self.csolution()?;
        let mut args = vec!["convert".to_string()];
        args.extend(self.input_args());
        args.push("-c".to_string());
        args.push(context.to_string());
        if let Some(dir) = &self.params.options.output_dir {
            args.push("-o".to_string());
            args.push(dir.display().to_string());
        }
        args.extend(self.schema_args());

        self.params
            .runner
            .execute(&csolution, self.params.options.quiet, &args)?;
        Ok(())
    }

    /// Look up the context's descriptor in the build index and build it.
    fn build_context(&self, context: &str) -> Result<PathBuf> {
        let cprj = get_cprj_file_path(&self.build_index_path(), context)?;
        CprjBuilder::new(
            self.params.runner.as_ref(),
            &self.params.install,
            &self.params.options,
            &cprj,
        )
        .build()
    }
}
