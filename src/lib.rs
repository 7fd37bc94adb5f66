//! ctxbuild - build front end for csolution-based embedded projects
//!
//! This crate discovers the contexts of a solution through `csolution`,
//! selects the ones a run acts on, and drives generation, pack
//! installation and the CMake/Ninja build for each of them.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for ctxbuild unit tests.
///
/// Only compiled for tests. Provides a mock [`util::Runner`] and fixture
/// trees with stub tool binaries.
#[cfg(test)]
pub mod test_support;

pub use self::core::{BuildError, BuilderOptions};
pub use ops::{BuilderParams, SolutionBuilder};
pub use util::{InstallConfig, ProcessRunner, Runner};
