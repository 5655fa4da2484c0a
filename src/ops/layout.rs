//! Output layout and the documentation plan.
//!
//! The plan is the hand-off to the documentation compiler: for every
//! target, in resolved order, the single symbol graph directory to read and
//! the archive directory to write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::context::BuildContext;
use crate::builder::options::SymbolGraphOptions;
use crate::builder::unify::SymbolGraphResult;
use crate::core::{Package, Target};
use crate::util::fs::write_string;

/// File extension of documentation archive directories.
pub const ARCHIVE_EXTENSION: &str = "doccarchive";

/// Where documentation archives go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsLayout {
    output_root: PathBuf,
    single_archive: Option<PathBuf>,
    combined_archive: Option<PathBuf>,
}

impl DocsLayout {
    /// Compute the layout for a resolved target list.
    ///
    /// - one target with an explicit output path: the archive is that path
    /// - otherwise: `<root>/<target>.doccarchive`, with `<root>` being the
    ///   output path or `<scratch>/docs`
    /// - combined builds add `<root>/<package>.doccarchive`
    pub fn new(
        ctx: &BuildContext,
        package: &Package,
        targets: &[&Target],
        output_path: Option<&Path>,
        combined: bool,
    ) -> Self {
        let output_root = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| ctx.docs_dir());

        let single_archive = match (output_path, targets.len(), combined) {
            (Some(path), 1, false) => Some(path.to_path_buf()),
            _ => None,
        };

        let combined_archive = combined
            .then(|| output_root.join(format!("{}.{}", package.name(), ARCHIVE_EXTENSION)));

        DocsLayout {
            output_root,
            single_archive,
            combined_archive,
        }
    }

    /// Directory containing the archives.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Archive directory for a target.
    pub fn archive_dir(&self, target: &Target) -> PathBuf {
        match &self.single_archive {
            Some(path) => path.clone(),
            None => self
                .output_root
                .join(format!("{}.{}", target.name, ARCHIVE_EXTENSION)),
        }
    }

    /// Archive directory for the combined build, if requested.
    pub fn combined_archive_dir(&self) -> Option<&Path> {
        self.combined_archive.as_deref()
    }
}

/// One target's entry in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedTarget {
    pub name: String,
    pub id: String,
    pub options: SymbolGraphOptions,
    pub symbol_graph_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_graph: Option<PathBuf>,
    pub archive_dir: PathBuf,
    pub symbol_graphs: SymbolGraphResult,
}

/// Everything the documentation compiler needs, in resolved target order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocsPlan {
    pub package: String,
    pub targets: Vec<PlannedTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_archive_dir: Option<PathBuf>,
}

impl DocsPlan {
    /// Create an empty plan for a package.
    pub fn new(package: &Package, layout: &DocsLayout) -> Self {
        DocsPlan {
            package: package.name().to_string(),
            targets: Vec::new(),
            combined_archive_dir: layout.combined_archive_dir().map(Path::to_path_buf),
        }
    }

    /// Append a target's results.
    pub fn push(
        &mut self,
        layout: &DocsLayout,
        target: &Target,
        options: SymbolGraphOptions,
        result: SymbolGraphResult,
    ) {
        self.targets.push(PlannedTarget {
            name: target.name.clone(),
            id: target.id.clone(),
            options,
            symbol_graph_dir: result.input_dir().to_path_buf(),
            snippet_graph: result.snippet_graph().map(Path::to_path_buf),
            archive_dir: layout.archive_dir(target),
            symbol_graphs: result,
        });
    }

    /// Serialize the plan as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize documentation plan")
    }

    /// Write the plan as JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_string(path, &self.to_json()?)
    }
}
