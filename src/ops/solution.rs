//! The solution builder and the parameters it runs with.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::errors::Result;
use crate::core::options::BuilderOptions;
use crate::util::process::Runner;
use crate::util::InstallConfig;

/// Everything one invocation of the builder needs.
#[derive(Clone)]
pub struct BuilderParams {
    /// Executes the external tools
    pub runner: Arc<dyn Runner>,

    /// Solution file (`*.csolution.yml`); may be empty for commands that
    /// do not need one
    pub input_file: PathBuf,

    /// Invocation options
    pub options: BuilderOptions,

    /// Tool locations
    pub install: InstallConfig,
}

impl std::fmt::Debug for BuilderParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderParams")
            .field("input_file", &self.input_file)
            .field("options", &self.options)
            .field("install", &self.install)
            .finish_non_exhaustive()
    }
}

/// Drives csolution, cpackget and the native build for a solution.
///
/// Operations are spread over the `ops` modules: listing in `list`,
/// context selection in `select`, pack installation in `packs` and the
/// build pipeline in `build`.
#[derive(Debug, Clone)]
pub struct SolutionBuilder {
    pub params: BuilderParams,
}

impl SolutionBuilder {
    /// Create a builder.
    pub fn new(params: BuilderParams) -> Self {
        SolutionBuilder { params }
    }

    /// Path to `csolution`, checked before any invocation.
    pub(crate) fn csolution(&self) -> Result<PathBuf> {
        self.params.install.require_tool("csolution")
    }

    /// Arguments naming the solution file, if one was given.
    pub(crate) fn input_args(&self) -> Vec<String> {
        if self.params.input_file.as_os_str().is_empty() {
            Vec::new()
        } else {
            vec![self.params.input_file.display().to_string()]
        }
    }

    /// `--no-check-schema` unless schema validation was requested.
    pub(crate) fn schema_args(&self) -> Vec<String> {
        if self.params.options.schema {
            Vec::new()
        } else {
            vec!["--no-check-schema".to_string()]
        }
    }

    /// Where `csolution convert` writes the build index:
    /// `<output dir or solution dir>/<solution name>.cbuild-idx.yml`.
    pub fn build_index_path(&self) -> PathBuf {
        let input = &self.params.input_file;
        let dir = match &self.params.options.output_dir {
            Some(dir) => dir.clone(),
            None => input.parent().unwrap_or_else(|| Path::new("")).to_path_buf(),
        };
        dir.join(format!("{}.cbuild-idx.yml", solution_name(input)))
    }
}

/// Solution name: the file name without `.csolution.yml`/`.csolution.yaml`
/// (or without its extension for other names).
pub fn solution_name(input: &Path) -> String {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    for suffix in [".csolution.yml", ".csolution.yaml"] {
        if let Some(stem) = file_name.strip_suffix(suffix) {
            return stem.to_string();
        }
    }

    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
