//! Test utilities and mocks for ctxbuild unit tests.
//!
//! [`MockRunner`] stands in for the external tools: expectations are
//! matched against the tool's file stem and the joined argument list, and
//! every call is recorded so tests can assert on invocation order.
//!
//! # Example
//!
//! ```rust,ignore
//! let runner = MockRunner::new()
//!     .expect("csolution", "list contexts", MockOutput::success("a.Debug+CM0"));
//! let out = runner.execute(Path::new("bin/csolution"), true, &args)?;
//! ```

pub mod fixtures;

use std::path::Path;
use std::sync::Mutex;

use crate::core::errors::{BuildError, Result};
use crate::util::process::Runner;

pub use fixtures::*;

/// Canned result of a mocked tool invocation.
#[derive(Debug, Clone)]
pub struct MockOutput {
    /// Whether the tool succeeds.
    pub success: bool,
    /// Standard output on success, diagnostic text on failure.
    pub text: String,
}

impl MockOutput {
    /// A successful invocation printing `stdout`.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockOutput {
            success: true,
            text: stdout.into(),
        }
    }

    /// A failed invocation reporting `diagnostic`.
    pub fn failure(diagnostic: impl Into<String>) -> Self {
        MockOutput {
            success: false,
            text: diagnostic.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Expectation {
    tool: String,
    args_prefix: String,
    output: MockOutput,
}

/// Mock [`Runner`] with per-tool canned output.
///
/// Unmatched invocations succeed with empty output, like a tool that has
/// nothing to report.
#[derive(Debug, Default)]
pub struct MockRunner {
    expectations: Vec<Expectation>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    /// Create a mock that answers every call with empty output.
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Answer calls to `tool` whose joined arguments start with `args_prefix`.
    ///
    /// The first matching expectation wins.
    pub fn expect(mut self, tool: &str, args_prefix: &str, output: MockOutput) -> Self {
        self.expectations.push(Expectation {
            tool: tool.to_string(),
            args_prefix: args_prefix.to_string(),
            output,
        });
        self
    }

    /// All recorded calls as `"<tool> <args>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Recorded calls made to `tool`.
    pub fn calls_to(&self, tool: &str) -> Vec<String> {
        let prefix = format!("{} ", tool);
        self.calls()
            .into_iter()
            .filter(|c| c == tool || c.starts_with(&prefix))
            .collect()
    }
}

impl Runner for MockRunner {
    fn execute(&self, program: &Path, _quiet: bool, args: &[String]) -> Result<String> {
        let tool = program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let joined = args.join(" ");

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{} {}", tool, joined).trim_end().to_string());
        }

        let matched = self
            .expectations
            .iter()
            .find(|e| e.tool == tool && joined.starts_with(&e.args_prefix));

        match matched {
            Some(e) if e.output.success => Ok(e.output.text.clone()),
            Some(e) => Err(BuildError::ToolInvocationFailed {
                program: tool,
                message: e.output.text.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_matches_tool_and_prefix() {
        let runner = MockRunner::new()
            .expect("csolution", "list contexts", MockOutput::success("a.Debug+CM0"))
            .expect("cpackget", "add", MockOutput::failure("boom"));

        let out = runner
            .execute(
                Path::new("/opt/bin/csolution.exe"),
                true,
                &["list".into(), "contexts".into()],
            )
            .unwrap();
        assert_eq!(out, "a.Debug+CM0");

        assert!(runner
            .execute(Path::new("cpackget"), true, &["add".into(), "ARM::x".into()])
            .is_err());
        assert_eq!(
            runner.execute(Path::new("ninja"), true, &[]).unwrap(),
            ""
        );

        assert_eq!(
            runner.calls(),
            vec!["csolution list contexts", "cpackget add ARM::x", "ninja"]
        );
        assert_eq!(runner.calls_to("cpackget"), vec!["cpackget add ARM::x"]);
    }
}
