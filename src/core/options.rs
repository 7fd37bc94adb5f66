//! Per-invocation builder options.

use std::path::PathBuf;

/// Options for one invocation of the builder.
///
/// Constructed once from CLI flags and configuration files, then read-only.
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Explicitly requested contexts (empty = all discovered)
    pub contexts: Vec<String>,

    /// Substring filter applied to discovered contexts and toolchains
    pub filter: String,

    /// Ask csolution to validate documents against their schema
    pub schema: bool,

    /// Install packs reported missing before building
    pub packs: bool,

    /// Output directory root
    pub output_dir: Option<PathBuf>,

    /// Intermediate directory root
    pub intermediate_dir: Option<PathBuf>,

    /// Number of contexts built concurrently
    pub jobs: usize,

    /// Stop scheduling further contexts after the first failure
    pub fail_fast: bool,

    /// Remove each context's intermediate directory before building
    pub clean: bool,

    /// Suppress echoing tool output
    pub quiet: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        BuilderOptions {
            contexts: Vec::new(),
            filter: String::new(),
            schema: false,
            packs: false,
            output_dir: None,
            intermediate_dir: None,
            jobs: 1,
            fail_fast: false,
            clean: false,
            quiet: false,
        }
    }
}
