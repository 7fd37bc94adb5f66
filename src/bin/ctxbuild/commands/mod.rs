//! Command implementations

pub mod build;
pub mod buildcprj;
pub mod list;
