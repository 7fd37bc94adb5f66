//! Context selection.
//!
//! Works out which contexts a run acts on, either from `csolution list
//! contexts` or from a build index, and validates explicitly requested
//! contexts against what was discovered.

use crate::core::build_index::get_selected_contexts;
use crate::core::context::{apply_filter, dedup_preserving_order};
use crate::core::errors::{BuildError, Result};
use crate::ops::SolutionBuilder;

/// Where the known contexts come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSource {
    /// Ask csolution.
    Solution,
    /// Read the solution's build index.
    BuildIndex,
}

impl SolutionBuilder {
    /// Known contexts from `source`, filtered by the configured filter in
    /// their original order.
    ///
    /// With `strict`, an empty result is [`BuildError::NoContextSelected`].
    pub fn select_contexts(&self, source: ContextSource, strict: bool) -> Result<Vec<String>> {
        let filter = &self.params.options.filter;
        let contexts = match source {
            ContextSource::Solution => self.list_contexts_filtered(true, filter)?,
            ContextSource::BuildIndex => {
                apply_filter(get_selected_contexts(&self.build_index_path())?, filter)
            }
        };

        if strict && contexts.is_empty() {
            return Err(BuildError::NoContextSelected);
        }
        Ok(contexts)
    }

    /// Contexts a build acts on.
    ///
    /// Explicitly requested contexts are used in the order given once every
    /// one of them is known to the solution; a single unknown context
    /// rejects the whole selection. Without an explicit list, all
    /// discovered contexts matching the filter are used.
    pub fn resolve_contexts(&self) -> Result<Vec<String>> {
        let requested = &self.params.options.contexts;
        if requested.is_empty() {
            return self.select_contexts(ContextSource::Solution, true);
        }

        let known = self.list_contexts_filtered(true, "")?;
        if let Some(unknown) = requested.iter().find(|c| !known.contains(c)) {
            return Err(BuildError::ContextNotFound {
                context: unknown.clone(),
            });
        }

        Ok(dedup_preserving_order(requested.iter().cloned()))
    }
}
