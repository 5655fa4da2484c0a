//! Implementation of `graphdoc generate`.
//!
//! For every selected target, in parallel:
//! options -> generation (serialized) -> snippet unification.
//! The results are gathered, in selection order, into a [`DocsPlan`].

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::builder::options::{
    build_options, SymbolGraphOptions, SymbolGraphOverrides, ToolchainCapabilities,
};
use crate::builder::{
    BuildContext, GenerationCoordinator, SnippetExtractor, SnippetUnifier, SymbolGraphGenerator,
    SymbolGraphResult,
};
use crate::core::{Package, Target, Workspace};
use crate::ops::layout::{DocsLayout, DocsPlan};
use crate::resolver::{resolve_or_default, Selection};

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct DocsOptions {
    /// Requested products and targets (empty = every documentable target)
    pub selection: Selection,

    /// Command-line symbol graph overrides
    pub overrides: SymbolGraphOverrides,

    /// What the generator supports
    pub capabilities: ToolchainCapabilities,

    /// Archive output path (or root, for several targets)
    pub output_path: Option<PathBuf>,

    /// Also plan a combined archive for all targets
    pub combined: bool,

    /// Number of parallel target workers
    pub jobs: Option<usize>,

    /// Verbose output (disables the progress bar)
    pub verbose: bool,
}

/// Symbol graphs produced for one target.
#[derive(Debug, Clone)]
pub struct TargetDocs {
    pub options: SymbolGraphOptions,
    pub result: SymbolGraphResult,
}

/// Run the per-target pipeline for a single target.
///
/// Steps run strictly in order: options, generation, unification.
pub fn document_target<G: SymbolGraphGenerator>(
    package: &Package,
    target: &Target,
    opts: &DocsOptions,
    coordinator: &GenerationCoordinator<G>,
    unifier: &SnippetUnifier<'_>,
) -> Result<TargetDocs> {
    let options = build_options(target, package, &opts.overrides, opts.capabilities);
    let graphs_dir = coordinator.generate(package, target, &options)?;
    let result = unifier.unify(package, target, graphs_dir)?;
    Ok(TargetDocs { options, result })
}

fn progress_bar(total: usize, verbose: bool) -> Option<ProgressBar> {
    if verbose || total <= 1 {
        return None;
    }

    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|s| s.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    Some(pb)
}

/// Generate symbol graphs for the selected targets and write the plan.
///
/// A failing target does not stop the others; once all workers are done,
/// every failure is logged and the first one is returned.
///
/// A target selected more than once is generated once; every occurrence
/// gets its own plan entry.
pub fn generate_docs<G: SymbolGraphGenerator>(
    ws: &Workspace,
    coordinator: &GenerationCoordinator<G>,
    extractor: Option<&dyn SnippetExtractor>,
    opts: &DocsOptions,
) -> Result<DocsPlan> {
    let start = Instant::now();
    let package = ws.package();
    let ctx = BuildContext::for_workspace(ws);

    let targets = resolve_or_default(&opts.selection, package)?;
    tracing::info!(
        "Documenting {} target(s): {}",
        targets.len(),
        targets
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut unique: Vec<&Target> = Vec::with_capacity(targets.len());
    for &target in &targets {
        if !unique.iter().any(|seen| std::ptr::eq(*seen, target)) {
            unique.push(target);
        }
    }

    ws.ensure_scratch_dir()?;
    let unifier = SnippetUnifier::new(&ctx, extractor);
    let pb = progress_bar(unique.len(), opts.verbose);

    let run = || -> Vec<Result<TargetDocs>> {
        unique
            .par_iter()
            .map(|target| {
                if let Some(pb) = &pb {
                    pb.set_message(target.name.clone());
                }
                let docs = document_target(package, target, opts, coordinator, &unifier)
                    .with_context(|| format!("failed to document `{}`", target.name));
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                docs
            })
            .collect()
    };

    let results = match opts.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to start worker pool")?
            .install(run),
        None => run(),
    };

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let mut documented: Vec<Option<TargetDocs>> = vec![None; unique.len()];
    let mut first_error = None;
    for (slot, result) in documented.iter_mut().zip(results) {
        match result {
            Ok(docs) => *slot = Some(docs),
            Err(e) => {
                tracing::error!("{:#}", e);
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    let layout = DocsLayout::new(
        &ctx,
        package,
        &targets,
        opts.output_path.as_deref(),
        opts.combined,
    );
    let mut plan = DocsPlan::new(package, &layout);
    for &target in &targets {
        let docs = unique
            .iter()
            .position(|seen| std::ptr::eq(*seen, target))
            .and_then(|i| documented[i].clone());
        if let Some(docs) = docs {
            plan.push(&layout, target, docs.options, docs.result);
        }
    }

    plan.write(&ctx.plan_path())?;
    tracing::debug!(
        "documented {} target(s) in {:.2}s",
        plan.targets.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(plan)
}
