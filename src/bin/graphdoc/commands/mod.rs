//! Command implementations

pub mod completions;
pub mod generate;
pub mod targets;

use std::path::PathBuf;

use anyhow::Result;
use graphdoc::core::Workspace;
use graphdoc::util::GlobalContext;

/// Load the workspace from `--manifest-path` or by searching upward.
pub fn load_workspace(ctx: &GlobalContext, manifest_path: Option<PathBuf>) -> Result<Workspace> {
    let manifest_path = match manifest_path {
        Some(path) => path,
        None => ctx.find_manifest()?,
    };
    tracing::debug!("using manifest {}", manifest_path.display());
    Workspace::new(&manifest_path)
}
