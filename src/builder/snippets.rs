//! The external snippet extractor.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::builder::context::BuildContext;
use crate::core::{Package, Target};
use crate::util::fs::{ensure_dir, list_files, remove_file_if_exists};
use crate::util::process::ProcessBuilder;

/// Extracts a package's snippets into a single snippet symbol graph file.
pub trait SnippetExtractor: Send + Sync {
    /// Return the generated snippet graph, or `None` if the package has no snippets.
    fn extract(&self, package: &Package, target: &Target) -> Result<Option<PathBuf>>;
}

/// Extractor backed by an external program.
///
/// Snippets belong to the package, not the target, so the tool runs at
/// most once per package; later targets reuse the cached result.
#[derive(Debug)]
pub struct ProcessSnippetExtractor {
    program: PathBuf,
    snippets_dir: String,
    ctx: BuildContext,
    cache: Mutex<HashMap<String, Option<PathBuf>>>,
}

impl ProcessSnippetExtractor {
    /// Create an extractor that runs `program` on files under `snippets_dir`.
    pub fn new(
        program: impl Into<PathBuf>,
        snippets_dir: impl Into<String>,
        ctx: BuildContext,
    ) -> Self {
        ProcessSnippetExtractor {
            program: program.into(),
            snippets_dir: snippets_dir.into(),
            ctx,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Snippet source files for a package, sorted.
    pub fn snippet_sources(&self, package: &Package) -> Result<Vec<PathBuf>> {
        list_files(&package.root().join(&self.snippets_dir))
    }

    fn run(&self, package: &Package) -> Result<Option<PathBuf>> {
        let sources = self.snippet_sources(package)?;
        if sources.is_empty() {
            tracing::debug!("no snippets found for `{}`", package.name());
            return Ok(None);
        }

        // A graph left by an earlier run must not pass for this run's output.
        let output = self.ctx.snippet_graph_path(package.name());
        ensure_dir(&self.ctx.snippet_graphs_dir())?;
        remove_file_if_exists(&output)?;

        tracing::info!(
            "Extracting {} snippet(s) for `{}`",
            sources.len(),
            package.name()
        );
        ProcessBuilder::new(&self.program)
            .cwd(package.root())
            .arg("--output")
            .arg(&output)
            .arg("--module-name")
            .arg(package.name())
            .args(&sources)
            .exec_and_check()
            .with_context(|| format!("failed to extract snippets for `{}`", package.name()))?;

        if output.is_file() {
            Ok(Some(output))
        } else {
            tracing::debug!(
                "snippet extractor produced no output for `{}`",
                package.name()
            );
            Ok(None)
        }
    }
}

impl SnippetExtractor for ProcessSnippetExtractor {
    fn extract(&self, package: &Package, target: &Target) -> Result<Option<PathBuf>> {
        // Held across the run so two targets of one package never race the tool.
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(cached) = cache.get(package.name()) {
            tracing::debug!(
                "reusing snippet graph of `{}` for `{}`",
                package.name(),
                target.name
            );
            return Ok(cached.clone());
        }

        let result = self.run(package)?;
        cache.insert(package.name().to_string(), result.clone());
        Ok(result)
    }
}
