//! Test fixtures for common test scenarios.
//!
//! [`SolutionFixture`] lays out a throwaway install tree with empty stub
//! tool binaries next to a solution file, which is enough for every code
//! path that checks tool presence before handing off to a [`MockRunner`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use super::{MockOutput, MockRunner};
use crate::core::options::BuilderOptions;
use crate::ops::BuilderParams;
use crate::util::InstallConfig;

/// Build index with four contexts spread over three documents.
pub const BUILD_INDEX_FIXTURE: &str = "\
build-idx:
  generated-by: csolution version 2.0.0
  csolution: Test.csolution.yml
  contexts:
    - context: HelloWorld_cm0plus.Debug+FRDM-K32L3A6
      cprj: cm0plus/HelloWorld_cm0plus.Debug+FRDM-K32L3A6.cprj
    - context: HelloWorld_cm0plus.Release+FRDM-K32L3A6
      cprj: cm0plus/HelloWorld_cm0plus.Release+FRDM-K32L3A6.cprj
---
build:
  context: HelloWorld_cm4.Debug+FRDM-K32L3A6
  cprj: cm4/HelloWorld_cm4.Debug+FRDM-K32L3A6.cprj
---
build:
  context: HelloWorld_cm4.Release+FRDM-K32L3A6
  cprj: cm4/HelloWorld_cm4.Release+FRDM-K32L3A6.cprj
";

/// Build index matching the contexts [`solution_runner`] reports.
pub const SOLUTION_INDEX_FIXTURE: &str = "\
build-idx:
  generated-by: csolution version 2.0.0
  csolution: test.csolution.yml
  contexts:
    - context: test.Debug+CM0
      cprj: test.Debug+CM0.cprj
    - context: test.Release+CM0
      cprj: test.Release+CM0.cprj
";

/// Write `contents` as `<dir>/<name>.cbuild-idx.yml` and return its path.
pub fn write_build_index(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(format!("{}.cbuild-idx.yml", name));
    std::fs::write(&path, contents).expect("failed to write build index");
    path
}

/// Runner answering like csolution does for the `test` solution.
pub fn solution_runner() -> MockRunner {
    MockRunner::new()
        .expect(
            "csolution",
            "list contexts",
            MockOutput::success("test.Debug+CM0\r\ntest.Release+CM0"),
        )
        .expect(
            "csolution",
            "list toolchains",
            MockOutput::success("AC5@5.6.7\nAC6@6.18.0\nGCC@11.2.1\nIAR@8.50.6\n"),
        )
        .expect(
            "csolution",
            "list packs",
            MockOutput::success("ARM::test:0.0.1\r\nARM::test2:0.0.2"),
        )
        .expect(
            "csolution",
            "list environment",
            MockOutput::success("CMSIS_PACK_ROOT=C:/Path/Packs\nCMSIS_COMPILER_ROOT=C:/Test/etc\n"),
        )
        .expect(
            "cmake",
            "--version",
            MockOutput::success("cmake version 3.28.1\n\nCMake suite maintained and supported by Kitware\n"),
        )
        .expect("ninja", "--version", MockOutput::success("1.11.1\n"))
}

/// Temporary install tree plus solution file.
pub struct SolutionFixture {
    pub dir: TempDir,
}

impl SolutionFixture {
    /// Create the tree with stub `csolution`, `cpackget` and `cbuildgen`.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let root = dir.path();

        for sub in ["bin", "etc", "packs", "OutDir", "IntDir"] {
            std::fs::create_dir_all(root.join(sub)).expect("failed to create fixture dir");
        }
        for tool in ["csolution", "cpackget", "cbuildgen"] {
            let stub = root
                .join("bin")
                .join(format!("{}{}", tool, std::env::consts::EXE_SUFFIX));
            std::fs::write(stub, "").expect("failed to create tool stub");
        }
        std::fs::write(root.join("test.csolution.yml"), "solution:\n")
            .expect("failed to write solution");

        SolutionFixture { dir }
    }

    /// Fixture root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the solution file.
    pub fn solution(&self) -> PathBuf {
        self.root().join("test.csolution.yml")
    }

    /// Install configuration rooted at the fixture's `bin/`.
    pub fn install(&self) -> InstallConfig {
        InstallConfig::from_roots(
            Some(self.root().join("bin")),
            Some(self.root().join("packs")),
            Some(self.root().join("etc")),
        )
        .expect("fixture install config")
    }

    /// Builder parameters for the fixture solution driven by `runner`.
    pub fn params(&self, runner: Arc<MockRunner>, options: BuilderOptions) -> BuilderParams {
        BuilderParams {
            runner,
            input_file: self.solution(),
            options,
            install: self.install(),
        }
    }
}

impl Default for SolutionFixture {
    fn default() -> Self {
        Self::new()
    }
}
