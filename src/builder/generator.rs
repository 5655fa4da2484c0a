//! The external symbol graph generator.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::context::BuildContext;
use crate::builder::options::{SymbolGraphOptions, ToolchainCapabilities};
use crate::core::{Package, Target};
use crate::util::fs::reset_dir;
use crate::util::process::ProcessBuilder;

/// Produces a directory of symbol graph files for one target.
///
/// Implementations are not required to tolerate concurrent calls; callers
/// go through [`GenerationCoordinator`](crate::builder::GenerationCoordinator).
pub trait SymbolGraphGenerator: Send + Sync {
    /// Generate symbol graphs and return the directory containing them.
    fn generate(
        &self,
        package: &Package,
        target: &Target,
        options: &SymbolGraphOptions,
    ) -> Result<PathBuf>;
}

/// Generator backed by an external program.
#[derive(Debug, Clone)]
pub struct ProcessGenerator {
    program: PathBuf,
    ctx: BuildContext,
    capabilities: ToolchainCapabilities,
}

impl ProcessGenerator {
    /// Create a generator that runs `program`.
    pub fn new(program: impl Into<PathBuf>, ctx: BuildContext) -> Self {
        ProcessGenerator {
            program: program.into(),
            ctx,
            capabilities: ToolchainCapabilities::default(),
        }
    }

    /// Set what the program supports.
    pub fn with_capabilities(mut self, capabilities: ToolchainCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    fn command(
        &self,
        package: &Package,
        target: &Target,
        options: &SymbolGraphOptions,
        output_dir: &Path,
    ) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .cwd(package.root())
            .arg("--package-path")
            .arg(package.root())
            .arg("--target")
            .arg(&target.name)
            .arg("--output-dir")
            .arg(output_dir)
            .args(options.to_args(self.capabilities))
    }
}

impl SymbolGraphGenerator for ProcessGenerator {
    fn generate(
        &self,
        package: &Package,
        target: &Target,
        options: &SymbolGraphOptions,
    ) -> Result<PathBuf> {
        let output_dir = self.ctx.target_graphs_dir(target);
        reset_dir(&output_dir)?;

        self.command(package, target, options, &output_dir)
            .exec_and_check()
            .with_context(|| format!("failed to generate symbol graphs for `{}`", target.name))?;

        Ok(output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::options::AccessLevel;
    use crate::test_support::fixtures::sample_package;

    #[test]
    fn test_command_line() {
        let pkg = sample_package();
        let target = pkg.target("Library").unwrap();
        let generator = ProcessGenerator::new("symbolgraph-extract", BuildContext::new("/s"));
        let options = SymbolGraphOptions {
            minimum_access_level: AccessLevel::Public,
            include_synthesized: true,
            include_extension_blocks: false,
        };

        let cmd = generator.command(&pkg, target, &options, Path::new("/s/out"));
        assert_eq!(
            cmd.get_args(),
            &[
                "--package-path".to_string(),
                pkg.root().display().to_string(),
                "--target".to_string(),
                "Library".to_string(),
                "--output-dir".to_string(),
                "/s/out".to_string(),
                "--minimum-access-level".to_string(),
                "public".to_string(),
                "--omit-extension-block-symbols".to_string(),
            ]
        );
    }

    #[test]
    fn test_command_line_without_extension_block_support() {
        let pkg = sample_package();
        let target = pkg.target("Executable").unwrap();
        let generator = ProcessGenerator::new("symbolgraph-extract", BuildContext::new("/s"))
            .with_capabilities(ToolchainCapabilities {
                extension_block_symbols: false,
            });
        let options = SymbolGraphOptions::defaults_for(target, &pkg);

        let cmd = generator.command(&pkg, target, &options, Path::new("/s/out"));
        assert!(!cmd
            .get_args()
            .iter()
            .any(|arg| arg.contains("extension-block")));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_names_target() {
        let tmp = tempfile::TempDir::new().unwrap();
        let pkg = sample_package();
        let target = pkg.target("Library").unwrap();
        let generator = ProcessGenerator::new("false", BuildContext::new(tmp.path()));
        let options = SymbolGraphOptions::defaults_for(target, &pkg);

        let err = generator.generate(&pkg, target, &options).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to generate symbol graphs for `Library`"));
    }
}
