//! Error types for context resolution and build orchestration.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage a context failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `csolution convert` for the context.
    Generate,
    /// Installing packs reported missing for the context.
    InstallPacks,
    /// Descriptor lookup and the CMake/Ninja build.
    Build,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Generate => write!(f, "generate"),
            Stage::InstallPacks => write!(f, "install-packs"),
            Stage::Build => write!(f, "build"),
        }
    }
}

/// One failed context, attributed to the stage that failed.
#[derive(Debug)]
pub struct ContextFailure {
    pub context: String,
    pub stage: Stage,
    pub error: BuildError,
}

impl fmt::Display for ContextFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.context, self.stage, self.error)
    }
}

/// Error raised by the listing, selection, manifest and build layers.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("install configuration not found: {message}")]
    ConfigNotFound { message: String },

    #[error("tool not found: {}", path.display())]
    ToolNotFound { path: PathBuf },

    #[error("`{program}` failed: {message}")]
    ToolInvocationFailed { program: String, message: String },

    #[error("build index not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("failed to parse build index {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("project descriptor not found: {}", path.display())]
    DescriptorNotFound { path: PathBuf },

    #[error("context `{context}` not found")]
    ContextNotFound { context: String },

    #[error("no context selected")]
    NoContextSelected,

    #[error("failed to install pack `{pack}`: {message}")]
    PackageInstallFailed { pack: String, message: String },

    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },

    #[error("{} context(s) failed:{}", failures.len(), render_failures(failures))]
    ContextsFailed { failures: Vec<ContextFailure> },
}

/// One indented line per failure, tool diagnostics included.
fn render_failures(failures: &[ContextFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("\n  {}", f.to_string().replace('\n', "\n    ")))
        .collect()
}

impl BuildError {
    /// Names of the failed contexts, in selection order.
    pub fn failed_contexts(&self) -> Vec<&str> {
        match self {
            BuildError::ContextsFailed { failures } => {
                failures.iter().map(|f| f.context.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_names_every_context() {
        let err = BuildError::ContextsFailed {
            failures: vec![
                ContextFailure {
                    context: "a.Debug+CM0".into(),
                    stage: Stage::Generate,
                    error: BuildError::NoContextSelected,
                },
                ContextFailure {
                    context: "b.Release+CM0".into(),
                    stage: Stage::Build,
                    error: BuildError::ContextNotFound {
                        context: "b.Release+CM0".into(),
                    },
                },
            ],
        };

        let msg = err.to_string();
        assert!(msg.starts_with("2 context(s) failed"));
        assert!(msg.contains("a.Debug+CM0 (generate)"));
        assert!(msg.contains("b.Release+CM0 (build): context `b.Release+CM0` not found"));
        assert!(msg.contains("a.Debug+CM0 (generate): no context selected"));
        assert_eq!(err.failed_contexts(), vec!["a.Debug+CM0", "b.Release+CM0"]);
    }

    #[test]
    fn test_aggregate_carries_tool_diagnostics() {
        let err = BuildError::ContextsFailed {
            failures: vec![ContextFailure {
                context: "a.Debug+CM0".into(),
                stage: Stage::Generate,
                error: BuildError::ToolInvocationFailed {
                    program: "csolution convert".into(),
                    message: "exit code Some(1)\nerror csolution: unknown pack".into(),
                },
            }],
        };

        let msg = err.to_string();
        assert!(msg.contains("a.Debug+CM0 (generate): `csolution convert` failed"));
        assert!(msg.contains("\n    error csolution: unknown pack"));
    }
}
