//! Core data structures.
//!
//! - Context identifiers and listing helpers
//! - Builder options
//! - The build index
//! - Error taxonomy

pub mod build_index;
pub mod context;
pub mod errors;
pub mod options;

pub use build_index::BuildIndex;
pub use errors::{BuildError, ContextFailure, Stage};
pub use options::BuilderOptions;
