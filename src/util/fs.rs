//! Filesystem utilities.

use std::fs;
use std::path::Path;

use crate::core::errors::{BuildError, Result};

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
