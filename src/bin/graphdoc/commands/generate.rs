//! `graphdoc generate` command

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::GenerateArgs;
use graphdoc::builder::{
    BuildContext, GenerationCoordinator, GenerationLock, ProcessGenerator,
    ProcessSnippetExtractor, SnippetExtractor, SymbolGraphOverrides,
};
use graphdoc::core::Workspace;
use graphdoc::ops::{generate_docs, DocsOptions};
use graphdoc::resolver::{resolve_or_default, Selection};
use graphdoc::util::config::load_config;
use graphdoc::util::diagnostic::{emit, suggestions, Diagnostic};
use graphdoc::util::fs::list_files;
use graphdoc::util::process::{resolve_tool, GENERATOR_PROGRAM, SNIPPET_EXTRACTOR_PROGRAM};
use graphdoc::util::GlobalContext;

pub fn execute(
    args: GenerateArgs,
    ctx: &GlobalContext,
    manifest_path: Option<PathBuf>,
) -> Result<()> {
    let ws = super::load_workspace(ctx, manifest_path)?;
    let build_ctx = BuildContext::for_workspace(&ws);

    // Selection mistakes are reported before any tool lookup.
    let selection = Selection::new(args.products.clone(), args.targets.clone());
    resolve_or_default(&selection, ws.package())?;

    // Load configuration (global + project)
    let config = load_config(ctx.global_config_path(), &ws.config_path());

    let program = resolve_tool(config.generator.program.as_deref(), GENERATOR_PROGRAM)
        .ok_or_else(|| missing_generator(&ws, config.generator.program.as_deref()))?;
    tracing::debug!("using generator {}", program.display());

    let extractor = if args.no_snippets || !config.snippets_enabled() {
        None
    } else {
        match resolve_tool(config.snippets.extractor.as_deref(), SNIPPET_EXTRACTOR_PROGRAM) {
            Some(program) => Some(ProcessSnippetExtractor::new(
                program,
                config.snippets_dir(),
                build_ctx.clone(),
            )),
            None => {
                let snippets_dir = ws.root().join(config.snippets_dir());
                if list_files(&snippets_dir)?.is_empty() {
                    tracing::debug!("snippet extractor not found, skipping snippets");
                } else {
                    let warning = Diagnostic::warning(format!(
                        "snippet extractor `{}` not found, snippets are skipped",
                        SNIPPET_EXTRACTOR_PROGRAM
                    ))
                    .with_location(snippets_dir)
                    .with_suggestion(
                        "Install it, set `snippets.extractor`, or pass --no-snippets",
                    );
                    emit(&warning, ctx.color());
                }
                None
            }
        }
    };

    let capabilities = config.capabilities();
    let coordinator = GenerationCoordinator::new(
        ProcessGenerator::new(program, build_ctx).with_capabilities(capabilities),
        GenerationLock::new(),
    );

    let opts = DocsOptions {
        selection,
        overrides: SymbolGraphOverrides {
            minimum_access_level: args.symbol_graph_minimum_access_level,
            skip_synthesized: args.skip_synthesized_symbols,
            extension_blocks: args.extension_blocks(),
        },
        capabilities,
        output_path: args.output_path.clone(),
        combined: args.combined,
        // Jobs: CLI > config > None (auto-detect)
        jobs: args.jobs.or(config.build.jobs),
        verbose: ctx.is_verbose(),
    };

    let plan = generate_docs(
        &ws,
        &coordinator,
        extractor.as_ref().map(|e| e as &dyn SnippetExtractor),
        &opts,
    )?;

    if args.emit_plan {
        println!("{}", plan.to_json()?);
        return Ok(());
    }

    for target in &plan.targets {
        eprintln!(
            "    Finished `{}` -> {}",
            target.name,
            target.symbol_graph_dir.display()
        );
    }
    eprintln!("        Plan {}", BuildContext::for_workspace(&ws).plan_path().display());

    Ok(())
}

fn missing_generator(ws: &Workspace, configured: Option<&Path>) -> Diagnostic {
    let name = configured
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| GENERATOR_PROGRAM.to_string());
    let diag = Diagnostic::error(format!("symbol graph generator `{}` not found", name))
        .with_suggestion(suggestions::NO_GENERATOR);

    let config_path = ws.config_path();
    if configured.is_some() && config_path.is_file() {
        diag.with_location(config_path)
    } else {
        diag
    }
}
