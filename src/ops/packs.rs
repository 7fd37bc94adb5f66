//! Installing packs csolution reports as missing.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::core::context::dedup_preserving_order;
use crate::core::errors::{BuildError, Result};
use crate::ops::SolutionBuilder;

/// Packs installed so far in this run.
///
/// Shared by concurrently building contexts: the lock is held for the
/// whole installer invocation, so the same pack is never downloaded twice
/// and installs into the pack root never overlap.
#[derive(Debug, Default)]
pub struct PackLedger {
    installed: Mutex<HashSet<String>>,
}

impl SolutionBuilder {
    /// Install every pack the solution is missing.
    ///
    /// Nothing to install is not an error; an unresolved install
    /// configuration is.
    pub fn install_missing_packs(&self) -> Result<()> {
        self.install_missing_packs_for(None, &PackLedger::default())
    }

    pub(crate) fn install_missing_packs_for(
        &self,
        context: Option<&str>,
        ledger: &PackLedger,
    ) -> Result<()> {
        self.params.install.validate()?;

        let missing = dedup_preserving_order(self.query_packs(true, true, context)?);
        if missing.is_empty() {
            tracing::debug!("no missing packs");
            return Ok(());
        }

        let cpackget = self.params.install.require_tool("cpackget")?;
        let pack_root = self.params.install.pack_root.display().to_string();

        let mut installed = ledger
            .installed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        for pack in missing {
            if installed.contains(&pack) {
                continue;
            }

            tracing::info!("Installing pack {}", pack);
            let args = vec![
                "add".to_string(),
                pack.clone(),
                "--pack-root".to_string(),
                pack_root.clone(),
                "--agree-embedded-license".to_string(),
            ];
            self.params
                .runner
                .execute(&cpackget, self.params.options.quiet, &args)
                .map_err(|e| BuildError::PackageInstallFailed {
                    pack: pack.clone(),
                    message: e.to_string(),
                })?;

            installed.insert(pack);
        }

        Ok(())
    }
}
