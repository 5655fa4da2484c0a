//! Package - read-only view of targets and products.

use std::path::{Path, PathBuf};

use anyhow::Result;
use semver::Version;

use crate::builder::options::SymbolGraphSettings;
use crate::core::manifest::Manifest;
use crate::core::target::{Product, Target};

/// A package with its targets, products, and location.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    version: Version,
    root: PathBuf,
    targets: Vec<Target>,
    products: Vec<Product>,
    symbol_graph: SymbolGraphSettings,
}

impl Package {
    /// Create an empty package.
    pub fn new(name: impl Into<String>, version: Version, root: impl Into<PathBuf>) -> Self {
        Package {
            name: name.into(),
            version,
            root: root.into(),
            targets: Vec::new(),
            products: Vec::new(),
            symbol_graph: SymbolGraphSettings::default(),
        }
    }

    /// Create a package from a parsed manifest and its root directory.
    pub fn from_manifest(manifest: &Manifest, root: PathBuf) -> Result<Self> {
        let version = manifest.package.version()?;
        Ok(Package::new(&manifest.package.name, version, root)
            .with_targets(manifest.build_targets())
            .with_products(manifest.products.clone())
            .with_symbol_graph_defaults(manifest.symbol_graph))
    }

    /// Load a package from a manifest file.
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let manifest = Manifest::load(manifest_path)?;
        let root = match manifest_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::from_manifest(&manifest, root)
    }

    /// Set the targets.
    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    /// Set the products.
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    /// Set package-wide symbol graph defaults.
    pub fn with_symbol_graph_defaults(mut self, settings: SymbolGraphSettings) -> Self {
        self.symbol_graph = settings;
        self
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the package version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Get the package root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get all targets, in declaration order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Get all products, in declaration order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get a target by name.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Get a product by name.
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Resolve a product's member targets, in product order.
    pub fn product_targets<'a>(&'a self, product: &'a Product) -> impl Iterator<Item = &'a Target> {
        product.targets.iter().filter_map(|name| self.target(name))
    }

    /// Get the package-wide symbol graph defaults.
    pub fn symbol_graph_defaults(&self) -> SymbolGraphSettings {
        self.symbol_graph
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_manifest(dir: &Path) -> PathBuf {
        let manifest_path = dir.join("Graphdoc.toml");
        std::fs::write(
            &manifest_path,
            r#"
[package]
name = "testpkg"
version = "1.0.0"

[[targets]]
name = "Core"
kind = "library"

[[targets]]
name = "Extras"
kind = "library"

[[products]]
name = "All"
targets = ["Extras", "Core"]
"#,
        )
        .unwrap();
        manifest_path
    }

    #[test]
    fn test_package_load() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_manifest(tmp.path());

        let pkg = Package::load(&manifest_path).unwrap();
        assert_eq!(pkg.name(), "testpkg");
        assert_eq!(pkg.version(), &Version::new(1, 0, 0));
        assert_eq!(pkg.root(), tmp.path());
        assert_eq!(pkg.targets().len(), 2);
    }

    #[test]
    fn test_product_targets_in_product_order() {
        let tmp = TempDir::new().unwrap();
        let pkg = Package::load(&create_test_manifest(tmp.path())).unwrap();

        let product = pkg.product("All").unwrap();
        let names: Vec<_> = pkg.product_targets(product).map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Extras", "Core"]);
    }
}
