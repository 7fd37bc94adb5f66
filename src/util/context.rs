//! Install configuration.
//!
//! Locates the directories every external tool is resolved against:
//! the binary root holding `csolution`, `cpackget` and `cbuildgen`, the
//! pack root and the compiler root. Resolved once at startup from the
//! process environment and passed down by value afterwards.
//!
//! | Variable              | Default                          |
//! |-----------------------|----------------------------------|
//! | `CMSIS_BUILD_ROOT`    | directory of the running binary  |
//! | `CMSIS_PACK_ROOT`     | `<user cache dir>/arm/packs`     |
//! | `CMSIS_COMPILER_ROOT` | `<binary root>/../etc`           |

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::core::errors::{BuildError, Result};

/// Environment variable naming the binary root.
pub const BUILD_ROOT_ENV: &str = "CMSIS_BUILD_ROOT";

/// Environment variable naming the pack root.
pub const PACK_ROOT_ENV: &str = "CMSIS_PACK_ROOT";

/// Environment variable naming the compiler root.
pub const COMPILER_ROOT_ENV: &str = "CMSIS_COMPILER_ROOT";

/// Locations of the installed tooling.
///
/// The zero value (`InstallConfig::default()`) is an unresolved
/// configuration and fails [`InstallConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallConfig {
    /// Directory holding the external tool binaries
    pub bin_path: PathBuf,

    /// Binary file extension (`.exe` on Windows)
    pub bin_extension: String,

    /// Pack installation root
    pub pack_root: PathBuf,

    /// Compiler configuration root
    pub compiler_root: PathBuf,
}

impl InstallConfig {
    /// Resolve the configuration from the process environment.
    pub fn resolve() -> Result<Self> {
        let bin_path = match std::env::var_os(BUILD_ROOT_ENV) {
            Some(root) => Some(PathBuf::from(root)),
            None => std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
        };

        Self::from_roots(
            bin_path,
            std::env::var_os(PACK_ROOT_ENV).map(PathBuf::from),
            std::env::var_os(COMPILER_ROOT_ENV).map(PathBuf::from),
        )
    }

    /// Build a configuration from explicit roots, applying defaults for
    /// the optional ones.
    pub fn from_roots(
        bin_path: Option<PathBuf>,
        pack_root: Option<PathBuf>,
        compiler_root: Option<PathBuf>,
    ) -> Result<Self> {
        let bin_path = bin_path.ok_or_else(|| BuildError::ConfigNotFound {
            message: format!("{} is not set", BUILD_ROOT_ENV),
        })?;

        if !bin_path.is_dir() {
            return Err(BuildError::ConfigNotFound {
                message: format!("binary root {} is not a directory", bin_path.display()),
            });
        }

        let pack_root = pack_root.unwrap_or_else(default_pack_root);
        let compiler_root = compiler_root.unwrap_or_else(|| bin_path.join("..").join("etc"));

        tracing::debug!(
            bin = %bin_path.display(),
            packs = %pack_root.display(),
            compiler = %compiler_root.display(),
            "resolved install configuration"
        );

        Ok(InstallConfig {
            bin_path,
            bin_extension: std::env::consts::EXE_SUFFIX.to_string(),
            pack_root,
            compiler_root,
        })
    }

    /// Check the binary root still points at a directory.
    pub fn validate(&self) -> Result<()> {
        if self.bin_path.as_os_str().is_empty() || !self.bin_path.is_dir() {
            return Err(BuildError::ConfigNotFound {
                message: format!("invalid binary root `{}`", self.bin_path.display()),
            });
        }
        Ok(())
    }

    /// Path a bundled tool would live at, whether or not it exists.
    pub fn tool_path(&self, name: &str) -> PathBuf {
        self.bin_path
            .join(format!("{}{}", name, self.bin_extension))
    }

    /// Path to a bundled tool, failing before any invocation if it is absent.
    pub fn require_tool(&self, name: &str) -> Result<PathBuf> {
        let path = self.tool_path(name);
        if !path.is_file() {
            return Err(BuildError::ToolNotFound { path });
        }
        Ok(path)
    }

    /// Path to a host tool such as `cmake`: the bundled copy if present,
    /// else the one on `PATH`, else the bare name.
    pub fn host_tool(&self, name: &str) -> PathBuf {
        let bundled = self.tool_path(name);
        if bundled.is_file() {
            return bundled;
        }
        which::which(name).unwrap_or_else(|_| PathBuf::from(name))
    }
}

fn default_pack_root() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.cache_dir().join("arm").join("packs"))
        .unwrap_or_else(|| PathBuf::from(".packs"))
}
