//! Test fixtures for common package shapes.

use std::path::PathBuf;

use semver::Version;

use crate::builder::options::SymbolGraphSettings;
use crate::core::{Package, Product, Target, TargetKind};

/// Manifest equivalent of [`sample_package`].
pub const SAMPLE_MANIFEST: &str = r#"[package]
name = "Sample"
version = "1.0.0"

[[targets]]
name = "Executable"
kind = "executable"

[[targets]]
name = "ExecutableMain"
kind = "executable"

[[targets]]
name = "Library"
kind = "library"

[[targets]]
name = "Tests"
kind = "test"

[[targets]]
name = "SystemZlib"
kind = "system-library"

[[products]]
name = "Executable"
targets = ["ExecutableMain"]

[[products]]
name = "Library"
targets = ["Library"]
"#;

/// A package with executable, library, test, and system-library targets.
///
/// Products: `Executable` -> `[ExecutableMain]`, `Library` -> `[Library]`.
pub fn sample_package() -> Package {
    package_with_products(
        vec![
            Target::executable("Executable", "exe"),
            Target::executable("ExecutableMain", "exe-main"),
            Target::library("Library", "lib"),
            Target::test("Tests", "tests"),
            Target::new("SystemZlib", "zlib", TargetKind::SystemLibrary),
        ],
        vec![
            Product::new("Executable", ["ExecutableMain"]),
            Product::new("Library", ["Library"]),
        ],
    )
}

/// A package with the given targets and products.
pub fn package_with_products(targets: Vec<Target>, products: Vec<Product>) -> Package {
    Package::new("Sample", Version::new(1, 0, 0), PathBuf::from("/work/sample"))
        .with_targets(targets)
        .with_products(products)
}

/// A package with package-level symbol graph defaults and no products.
pub fn package_with(settings: SymbolGraphSettings, targets: Vec<Target>) -> Package {
    package_with_products(targets, Vec::new()).with_symbol_graph_defaults(settings)
}
