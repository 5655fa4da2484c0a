//! `graphdoc targets` command
//!
//! Lists the targets and products that can be passed to `generate`.

use std::path::PathBuf;

use anyhow::Result;

use graphdoc::resolver::documentable_targets;
use graphdoc::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, manifest_path: Option<PathBuf>) -> Result<()> {
    let ws = super::load_workspace(ctx, manifest_path)?;
    let package = ws.package();

    println!("{}", package);
    println!();
    println!("Documentable targets:");
    let targets = documentable_targets(package);
    if targets.is_empty() {
        println!("    (none)");
    }
    for target in targets {
        println!("    {} ({})", target.name, target.kind);
    }

    if package.products().is_empty() {
        return Ok(());
    }

    println!();
    println!("Products:");
    for product in package.products() {
        let members: Vec<&str> = package
            .product_targets(product)
            .filter(|t| t.is_documentable())
            .map(|t| t.name.as_str())
            .collect();
        if members.is_empty() {
            println!("    {} (no documentable targets)", product.name);
        } else {
            println!("    {}: {}", product.name, members.join(", "));
        }
    }

    Ok(())
}
