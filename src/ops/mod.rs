//! High-level operations.
//!
//! This module contains the implementation of ctxbuild commands.

pub mod build;
pub mod list;
pub mod packs;
pub mod select;
pub mod solution;

pub use build::{BuildSummary, ContextOutcome};
pub use list::ListNoun;
pub use select::ContextSource;
pub use solution::{BuilderParams, SolutionBuilder};
