//! Build context - where pipeline outputs live.
//!
//! Every per-target path embeds the target's name and id, so concurrent
//! workers for different targets never write to the same location.

use std::path::{Path, PathBuf};

use crate::core::{Target, Workspace};

/// Name of the subdirectory holding a target's own graphs inside a unified directory.
pub const TARGET_SYMBOL_GRAPHS_DIR: &str = "target-symbol-graphs";

/// Paths under the scratch directory used by the pipeline.
#[derive(Debug, Clone)]
pub struct BuildContext {
    scratch_dir: PathBuf,
}

impl BuildContext {
    /// Create a build context rooted at a scratch directory.
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        BuildContext {
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Create a build context for a workspace.
    pub fn for_workspace(ws: &Workspace) -> Self {
        Self::new(ws.scratch_dir())
    }

    /// Get the scratch directory.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Root of all symbol graph outputs.
    pub fn symbol_graphs_dir(&self) -> PathBuf {
        self.scratch_dir.join("symbol-graphs")
    }

    /// Generator output directory for a target.
    pub fn target_graphs_dir(&self, target: &Target) -> PathBuf {
        self.symbol_graphs_dir()
            .join("targets")
            .join(target.dir_name())
    }

    /// Directory holding extracted snippet graphs.
    pub fn snippet_graphs_dir(&self) -> PathBuf {
        self.symbol_graphs_dir().join("snippet-symbol-graphs")
    }

    /// Snippet graph file for a package.
    pub fn snippet_graph_path(&self, package_name: &str) -> PathBuf {
        self.snippet_graphs_dir()
            .join(format!("{}-snippets.symbols.json", package_name))
    }

    /// Unified directory for a target.
    pub fn unified_dir(&self, target: &Target) -> PathBuf {
        self.symbol_graphs_dir()
            .join("unified-symbol-graphs")
            .join(target.dir_name())
    }

    /// Default root for documentation archives.
    pub fn docs_dir(&self) -> PathBuf {
        self.scratch_dir.join("docs")
    }

    /// Location of the documentation plan.
    pub fn plan_path(&self) -> PathBuf {
        self.scratch_dir.join("docs-plan.json")
    }
}
