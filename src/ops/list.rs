//! `csolution list` queries.
//!
//! Every query has the same shape: run `csolution list <noun>`, split the
//! output into lines (CRLF or LF), drop empty lines and, for contexts and
//! toolchains, keep only entries containing the configured filter. Order
//! is exactly as csolution reports it.

use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::context::{apply_filter, split_lines};
use crate::core::errors::{BuildError, Result};
use crate::ops::SolutionBuilder;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+(?:\.\d+)*").expect("valid version pattern"));

/// What `csolution list` enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListNoun {
    Contexts,
    Toolchains,
    Packs,
    Environment,
}

impl ListNoun {
    fn as_str(&self) -> &'static str {
        match self {
            ListNoun::Contexts => "contexts",
            ListNoun::Toolchains => "toolchains",
            ListNoun::Packs => "packs",
            ListNoun::Environment => "environment",
        }
    }
}

impl SolutionBuilder {
    fn run_list(&self, noun: ListNoun, quiet: bool, extra: &[String]) -> Result<Vec<String>> {
        let csolution = self.csolution()?;

        let mut args = vec!["list".to_string(), noun.as_str().to_string()];
        if noun != ListNoun::Environment {
            args.extend(self.input_args());
        }
        args.extend(extra.iter().cloned());
        args.extend(self.schema_args());

        let output = self.params.runner.execute(&csolution, quiet, &args)?;
        Ok(split_lines(&output))
    }

    /// Contexts of the solution containing `filter`.
    pub(crate) fn list_contexts_filtered(&self, quiet: bool, filter: &str) -> Result<Vec<String>> {
        let extra = if filter.is_empty() {
            Vec::new()
        } else {
            vec!["--filter".to_string(), filter.to_string()]
        };
        let contexts = self.run_list(ListNoun::Contexts, quiet, &extra)?;
        Ok(apply_filter(contexts, filter))
    }

    /// Contexts of the solution, filtered by the configured filter.
    pub fn list_contexts(&self, quiet: bool) -> Result<Vec<String>> {
        self.list_contexts_filtered(quiet, &self.params.options.filter)
    }

    /// Toolchains (`<name>@<version>`), filtered by the configured filter.
    pub fn list_toolchains(&self, quiet: bool) -> Result<Vec<String>> {
        let toolchains = self.run_list(ListNoun::Toolchains, quiet, &[])?;
        Ok(apply_filter(toolchains, &self.params.options.filter))
    }

    /// Packs used by the solution, or only the missing ones, filtered by
    /// the configured filter. `context` narrows the query to one context.
    pub fn list_packs(&self, quiet: bool, missing: bool, context: Option<&str>) -> Result<Vec<String>> {
        let packs = self.query_packs(quiet, missing, context)?;
        Ok(apply_filter(packs, &self.params.options.filter))
    }

    /// Unfiltered pack query; the configured filter selects contexts, not
    /// packs, when installing.
    pub(crate) fn query_packs(
        &self,
        quiet: bool,
        missing: bool,
        context: Option<&str>,
    ) -> Result<Vec<String>> {
        let mut extra = Vec::new();
        if missing {
            extra.push("--missing".to_string());
        }
        if let Some(context) = context {
            extra.push("-c".to_string());
            extra.push(context.to_string());
        }
        self.run_list(ListNoun::Packs, quiet, &extra)
    }

    /// csolution's `KEY=VALUE` environment followed by `cmake=<version>`
    /// and `ninja=<version>`.
    pub fn list_environment(&self, quiet: bool) -> Result<Vec<String>> {
        self.params.install.validate()?;

        let mut entries = self.run_list(ListNoun::Environment, quiet, &[])?;
        entries.push(format!("cmake={}", self.tool_version("cmake")));
        entries.push(format!("ninja={}", self.tool_version("ninja")));
        Ok(entries)
    }

    /// First dotted version in `<tool> --version`, or `unknown`.
    fn tool_version(&self, tool: &str) -> String {
        let program = self.params.install.host_tool(tool);
        match self
            .params
            .runner
            .execute(&program, true, &["--version".to_string()])
        {
            Ok(output) => parse_version(&output).unwrap_or_else(|| "unknown".to_string()),
            Err(e) => {
                tracing::debug!("could not detect {} version: {}", tool, e);
                "unknown".to_string()
            }
        }
    }

    /// Print the solution's contexts, one per line.
    pub fn report_contexts(&self, out: &mut dyn Write) -> Result<()> {
        print_lines(out, &self.list_contexts(true)?)
    }

    /// Print the available toolchains, one per line.
    pub fn report_toolchains(&self, out: &mut dyn Write) -> Result<()> {
        print_lines(out, &self.list_toolchains(true)?)
    }

    /// Print the solution's packs, one per line.
    pub fn report_packs(&self, out: &mut dyn Write, missing: bool) -> Result<()> {
        print_lines(out, &self.list_packs(true, missing, None)?)
    }

    /// Print the environment, one `KEY=VALUE` per line.
    pub fn report_environment(&self, out: &mut dyn Write) -> Result<()> {
        print_lines(out, &self.list_environment(true)?)
    }
}

fn parse_version(output: &str) -> Option<String> {
    VERSION_RE.find(output).map(|m| m.as_str().to_string())
}

fn print_lines(out: &mut dyn Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line).map_err(|source| BuildError::Output { source })?;
    }
    Ok(())
}
