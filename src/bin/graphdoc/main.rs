//! graphdoc CLI - symbol graph generation for documentation builds

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use graphdoc::core::workspace::ManifestError;
use graphdoc::resolver::SelectionError;
use graphdoc::util::diagnostic::{emit, suggestions, Diagnostic};
use graphdoc::util::GlobalContext;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;
    let verbose = cli.verbose;

    if let Err(e) = run(cli) {
        report(&e, color, verbose);
        std::process::exit(1);
    }
}

/// Print an error, using its diagnostic form when one exists.
fn report(e: &anyhow::Error, color: bool, verbose: bool) {
    if let Some(err) = e.downcast_ref::<SelectionError>() {
        emit(&err.to_diagnostic(), color);
    } else if let Some(diag) = e.downcast_ref::<Diagnostic>() {
        emit(diag, color);
    } else if let Some(err) = e.downcast_ref::<ManifestError>() {
        emit(
            &Diagnostic::error(err.to_string()).with_suggestion(suggestions::NO_MANIFEST),
            color,
        );
    } else {
        eprintln!("error: {:#}", e);
        if !verbose {
            eprintln!("\nhelp: {}", suggestions::GENERATION_FAILED);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("graphdoc=debug")
    } else {
        EnvFilter::new("graphdoc=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &ctx, cli.manifest_path),
        Commands::Targets => commands::targets::execute(&ctx, cli.manifest_path),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
