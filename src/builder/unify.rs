//! Merging snippet graphs with a target's own symbol graphs.
//!
//! The documentation compiler accepts a single input directory. When a
//! package has snippets, each target gets a unified directory:
//!
//! ```text
//! unified-symbol-graphs/<name>-<id>/
//!     target-symbol-graphs/   copy of the generator output
//!     <pkg>-snippets.symbols.json
//! ```
//!
//! Sources are copied, never moved; the generator output stays valid for
//! other consumers.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::builder::context::{BuildContext, TARGET_SYMBOL_GRAPHS_DIR};
use crate::builder::snippets::SnippetExtractor;
use crate::core::{Package, Target};
use crate::util::fs::{copy_dir_all, reset_dir};

/// Symbol graphs for one target, ready for the documentation compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SymbolGraphResult {
    /// The generator output, used as-is.
    Single { dir: PathBuf },

    /// A freshly built directory merging target and snippet graphs.
    Unified {
        unified_dir: PathBuf,
        target_graphs_dir: PathBuf,
        snippet_graph: Option<PathBuf>,
    },
}

impl SymbolGraphResult {
    /// The one directory to hand to the documentation compiler.
    pub fn input_dir(&self) -> &Path {
        match self {
            SymbolGraphResult::Single { dir } => dir,
            SymbolGraphResult::Unified { unified_dir, .. } => unified_dir,
        }
    }

    /// The snippet graph file, if snippets were merged.
    pub fn snippet_graph(&self) -> Option<&Path> {
        match self {
            SymbolGraphResult::Single { .. } => None,
            SymbolGraphResult::Unified { snippet_graph, .. } => snippet_graph.as_deref(),
        }
    }
}

/// Builds unified directories when snippets are available.
pub struct SnippetUnifier<'a> {
    ctx: &'a BuildContext,
    extractor: Option<&'a dyn SnippetExtractor>,
}

impl<'a> SnippetUnifier<'a> {
    /// Create a unifier; `None` disables snippet handling entirely.
    pub fn new(ctx: &'a BuildContext, extractor: Option<&'a dyn SnippetExtractor>) -> Self {
        SnippetUnifier { ctx, extractor }
    }

    /// Merge snippet graphs into a target's symbol graphs, if there are any.
    ///
    /// On error the unified directory may be half-built and must not be
    /// used; the next run resets it.
    pub fn unify(
        &self,
        package: &Package,
        target: &Target,
        target_graphs_dir: PathBuf,
    ) -> Result<SymbolGraphResult> {
        let Some(extractor) = self.extractor else {
            return Ok(SymbolGraphResult::Single {
                dir: target_graphs_dir,
            });
        };

        let Some(snippet_graph) = extractor.extract(package, target)? else {
            return Ok(SymbolGraphResult::Single {
                dir: target_graphs_dir,
            });
        };

        let unified_dir = self.ctx.unified_dir(target);
        tracing::debug!(
            "unifying symbol graphs for `{}` into {}",
            target.name,
            unified_dir.display()
        );

        reset_dir(&unified_dir)?;

        let copied_graphs = unified_dir.join(TARGET_SYMBOL_GRAPHS_DIR);
        copy_dir_all(&target_graphs_dir, &copied_graphs)?;

        let file_name = snippet_graph.file_name().ok_or_else(|| {
            anyhow!(
                "snippet graph path has no file name: {}",
                snippet_graph.display()
            )
        })?;
        let copied_snippet = unified_dir.join(file_name);
        std::fs::copy(&snippet_graph, &copied_snippet).with_context(|| {
            format!(
                "failed to copy {} to {}",
                snippet_graph.display(),
                copied_snippet.display()
            )
        })?;

        Ok(SymbolGraphResult::Unified {
            unified_dir,
            target_graphs_dir: copied_graphs,
            snippet_graph: Some(copied_snippet),
        })
    }
}
