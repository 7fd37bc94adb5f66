//! Build-index (`*.cbuild-idx.yml`) parsing.
//!
//! The build index is written by `csolution convert` and maps every
//! context of a solution to its generated project descriptor (`.cprj`).
//! It may be a multi-document YAML stream: the front document carries
//! solution-level facts and may list context records, and any further
//! document carries a single context record.
//!
//! ```yaml
//! build-idx:
//!   generated-by: csolution version 2.0.0
//!   csolution: Test.csolution.yml
//!   contexts:
//!     - context: HelloWorld_cm0plus.Debug+FRDM-K32L3A6
//!       cprj: cm0plus/HelloWorld_cm0plus.Debug+FRDM-K32L3A6.cprj
//! ---
//! build:
//!   context: HelloWorld_cm4.Debug+FRDM-K32L3A6
//!   cprj: cm4/HelloWorld_cm4.Debug+FRDM-K32L3A6.cprj
//! ```
//!
//! Descriptor paths are stored relative to the index file's directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::errors::{BuildError, Result};

/// One context entry in the build index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContextRecord {
    /// Context identifier
    pub context: String,

    /// Project descriptor path, relative to the index directory
    pub cprj: PathBuf,
}

/// Solution-level facts from the front document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildIdx {
    #[serde(default)]
    pub generated_by: Option<String>,

    #[serde(default)]
    pub csolution: Option<PathBuf>,

    #[serde(default)]
    pub contexts: Vec<ContextRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct IndexDocument {
    #[serde(default)]
    build_idx: Option<BuildIdx>,

    #[serde(default)]
    build: Option<ContextRecord>,
}

/// A loaded build index with all documents merged.
#[derive(Debug, Clone)]
pub struct BuildIndex {
    path: PathBuf,
    front: BuildIdx,
    records: Vec<ContextRecord>,
}

impl BuildIndex {
    /// Load and merge every document of the index at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(BuildError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let index = Self::parse(path, &contents)?;
        tracing::debug!(
            "loaded {} context(s) from {}",
            index.records.len(),
            path.display()
        );
        Ok(index)
    }

    /// Parse index `contents` as if read from `path`.
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let mut front: Option<BuildIdx> = None;
        let mut records = Vec::new();

        for document in serde_yaml::Deserializer::from_str(contents) {
            let doc = Option::<IndexDocument>::deserialize(document).map_err(|e| {
                BuildError::ManifestParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?;
            let Some(doc) = doc else { continue };

            if let Some(mut idx) = doc.build_idx {
                records.append(&mut idx.contexts);
                front.get_or_insert(idx);
            }
            if let Some(record) = doc.build {
                records.push(record);
            }
        }

        let mut seen = std::collections::HashSet::new();
        records.retain(|r| seen.insert(r.context.clone()));

        Ok(BuildIndex {
            path: path.to_path_buf(),
            front: front.unwrap_or_default(),
            records,
        })
    }

    /// Solution-level facts.
    pub fn front(&self) -> &BuildIdx {
        &self.front
    }

    /// Context identifiers in declaration order, duplicates removed.
    pub fn contexts(&self) -> Vec<String> {
        self.records.iter().map(|r| r.context.clone()).collect()
    }

    /// Descriptor path of `context`, resolved against the index directory.
    pub fn cprj_path(&self, context: &str) -> Result<PathBuf> {
        let record = self
            .records
            .iter()
            .find(|r| r.context == context)
            .ok_or_else(|| BuildError::ContextNotFound {
                context: context.to_string(),
            })?;

        let base = self.path.parent().unwrap_or_else(|| Path::new(""));
        Ok(base.join(&record.cprj))
    }
}

/// Contexts declared in the index at `index_path`.
pub fn get_selected_contexts(index_path: &Path) -> Result<Vec<String>> {
    Ok(BuildIndex::load(index_path)?.contexts())
}

/// Descriptor path for `context` from the index at `index_path`.
pub fn get_cprj_file_path(index_path: &Path, context: &str) -> Result<PathBuf> {
    BuildIndex::load(index_path)?.cprj_path(context)
}
