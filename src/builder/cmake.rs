//! Native build of one project descriptor.
//!
//! `cbuildgen` turns the `.cprj` into a CMake project inside the
//! intermediate directory, CMake configures it for Ninja, and Ninja runs
//! the build.

use std::path::{Path, PathBuf};

use crate::core::errors::{BuildError, Result};
use crate::core::options::BuilderOptions;
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};
use crate::util::process::Runner;
use crate::util::InstallConfig;

/// Builds a single `.cprj` into its own output/intermediate directories.
pub struct CprjBuilder<'a> {
    runner: &'a dyn Runner,
    install: &'a InstallConfig,
    cprj: PathBuf,
    output_dir: PathBuf,
    intermediate_dir: PathBuf,
    clean: bool,
    quiet: bool,
}

impl<'a> CprjBuilder<'a> {
    /// Create a builder for `cprj`.
    ///
    /// Directories are `<root>/<descriptor name>`, with the roots taken
    /// from `options` or defaulting to `out/` and `tmp/` beside the
    /// descriptor.
    pub fn new(
        runner: &'a dyn Runner,
        install: &'a InstallConfig,
        options: &BuilderOptions,
        cprj: &Path,
    ) -> Self {
        let base = cprj.parent().unwrap_or_else(|| Path::new(""));
        let name = descriptor_name(cprj);

        let output_root = options
            .output_dir
            .clone()
            .unwrap_or_else(|| base.join("out"));
        let intermediate_root = options
            .intermediate_dir
            .clone()
            .unwrap_or_else(|| base.join("tmp"));

        CprjBuilder {
            runner,
            install,
            cprj: cprj.to_path_buf(),
            output_dir: output_root.join(&name),
            intermediate_dir: intermediate_root.join(&name),
            clean: options.clean,
            quiet: options.quiet,
        }
    }

    /// Output directory for this descriptor.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Intermediate directory for this descriptor.
    pub fn intermediate_dir(&self) -> &Path {
        &self.intermediate_dir
    }

    /// Generate, configure and build. Returns the output directory.
    pub fn build(&self) -> Result<PathBuf> {
        if !self.cprj.is_file() {
            return Err(BuildError::DescriptorNotFound {
                path: self.cprj.clone(),
            });
        }
        let cbuildgen = self.install.require_tool("cbuildgen")?;

        if self.clean {
            tracing::debug!("cleaning {}", self.intermediate_dir.display());
            remove_dir_all_if_exists(&self.intermediate_dir)?;
        }
        ensure_dir(&self.output_dir)?;
        ensure_dir(&self.intermediate_dir)?;

        self.generate(&cbuildgen)?;
        self.configure()?;
        self.compile()?;

        Ok(self.output_dir.clone())
    }

    fn generate(&self, cbuildgen: &Path) -> Result<()> {
        tracing::info!("Generating CMake project for {}", self.cprj.display());

        let args = vec![
            "cmake".to_string(),
            self.cprj.display().to_string(),
            format!("--outdir={}", self.output_dir.display()),
            format!("--intdir={}", self.intermediate_dir.display()),
        ];
        self.runner.execute(cbuildgen, self.quiet, &args)?;
        Ok(())
    }

    fn configure(&self) -> Result<()> {
        tracing::info!("Configuring {}", self.intermediate_dir.display());

        let cmake = self.install.host_tool("cmake");
        let dir = self.intermediate_dir.display().to_string();
        let args = vec![
            "-G".to_string(),
            "Ninja".to_string(),
            "-S".to_string(),
            dir.clone(),
            "-B".to_string(),
            dir,
        ];
        self.runner.execute(&cmake, self.quiet, &args)?;
        Ok(())
    }

    fn compile(&self) -> Result<()> {
        tracing::info!("Building {}", self.intermediate_dir.display());

        let ninja = self.install.host_tool("ninja");
        let args = vec![
            "-C".to_string(),
            self.intermediate_dir.display().to_string(),
        ];
        self.runner.execute(&ninja, self.quiet, &args)?;
        Ok(())
    }
}

/// Descriptor name used for per-context directories (`test.Debug+CM0`).
pub fn descriptor_name(cprj: &Path) -> String {
    cprj.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockOutput, MockRunner, SolutionFixture};

    #[test]
    fn test_build_runs_generate_configure_compile() {
        let fixture = SolutionFixture::new();
        let install = fixture.install();
        let cprj = fixture.root().join("test.Debug+CM0.cprj");
        std::fs::write(&cprj, "<cprj/>").unwrap();

        let runner = MockRunner::new();
        let builder = CprjBuilder::new(&runner, &install, &BuilderOptions::default(), &cprj);
        let out = builder.build().unwrap();

        assert_eq!(out, fixture.root().join("out").join("test.Debug+CM0"));
        assert!(builder.intermediate_dir().is_dir());

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].starts_with("cbuildgen cmake"));
        assert!(calls[1].starts_with("cmake -G Ninja -S"));
        assert!(calls[2].starts_with("ninja -C"));
    }

    #[test]
    fn test_configured_roots() {
        let fixture = SolutionFixture::new();
        let install = fixture.install();
        let cprj = fixture.root().join("test.Release+CM0.cprj");
        let options = BuilderOptions {
            output_dir: Some(fixture.root().join("OutDir")),
            intermediate_dir: Some(fixture.root().join("IntDir")),
            ..BuilderOptions::default()
        };

        let runner = MockRunner::new();
        let builder = CprjBuilder::new(&runner, &install, &options, &cprj);
        assert_eq!(
            builder.output_dir(),
            fixture.root().join("OutDir").join("test.Release+CM0")
        );
        assert_eq!(
            builder.intermediate_dir(),
            fixture.root().join("IntDir").join("test.Release+CM0")
        );
    }

    #[test]
    fn test_missing_descriptor() {
        let fixture = SolutionFixture::new();
        let install = fixture.install();
        let runner = MockRunner::new();
        let cprj = fixture.root().join("missing.cprj");

        let err = CprjBuilder::new(&runner, &install, &BuilderOptions::default(), &cprj)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::DescriptorNotFound { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_ninja_failure_stops_build() {
        let fixture = SolutionFixture::new();
        let install = fixture.install();
        let cprj = fixture.root().join("test.Debug+CM0.cprj");
        std::fs::write(&cprj, "<cprj/>").unwrap();

        let runner = MockRunner::new().expect("ninja", "-C", MockOutput::failure("ld: undefined"));
        let err = CprjBuilder::new(&runner, &install, &BuilderOptions::default(), &cprj)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("ld: undefined"));
    }

    #[test]
    fn test_clean_removes_intermediate() {
        let fixture = SolutionFixture::new();
        let install = fixture.install();
        let cprj = fixture.root().join("test.Debug+CM0.cprj");
        std::fs::write(&cprj, "<cprj/>").unwrap();

        let stale = fixture.root().join("tmp").join("test.Debug+CM0").join("stale.o");
        std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
        std::fs::write(&stale, "").unwrap();

        let options = BuilderOptions {
            clean: true,
            ..BuilderOptions::default()
        };
        let runner = MockRunner::new();
        CprjBuilder::new(&runner, &install, &options, &cprj)
            .build()
            .unwrap();
        assert!(!stale.exists());
    }
}
