//! Graphdoc.toml manifest parsing and schema.
//!
//! The manifest describes the package model: its targets, the products
//! grouping them, and package-wide symbol graph defaults.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::builder::options::SymbolGraphSettings;
use crate::core::target::{ModuleKind, Product, Target, TargetKind};
use crate::util::hash::short_id;

/// The parsed Graphdoc.toml manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Package metadata
    pub package: PackageMetadata,

    /// Package-wide symbol graph defaults
    #[serde(default, rename = "symbol-graph")]
    pub symbol_graph: SymbolGraphSettings,

    /// Targets, in declaration order
    #[serde(default)]
    pub targets: Vec<TargetSpec>,

    /// Products, in declaration order
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Package metadata from the [package] section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name
    pub name: String,

    /// Package version (semver)
    #[serde(default = "default_version")]
    pub version: String,

    /// Package description
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

impl PackageMetadata {
    /// Parse the version string as semver.
    pub fn version(&self) -> Result<Version> {
        self.version.parse().with_context(|| {
            format!("invalid version `{}` for package `{}`", self.version, self.name)
        })
    }
}

/// Target kind as spelled in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKindSpec {
    #[serde(alias = "lib")]
    Library,
    #[serde(alias = "exe", alias = "bin")]
    Executable,
    Test,
    SystemLibrary,
    Binary,
    Other,
}

impl From<TargetKindSpec> for TargetKind {
    fn from(spec: TargetKindSpec) -> Self {
        match spec {
            TargetKindSpec::Library => TargetKind::SourceModule(ModuleKind::Library),
            TargetKindSpec::Executable => TargetKind::SourceModule(ModuleKind::Executable),
            TargetKindSpec::Test => TargetKind::SourceModule(ModuleKind::Test),
            TargetKindSpec::SystemLibrary => TargetKind::SystemLibrary,
            TargetKindSpec::Binary => TargetKind::Binary,
            TargetKindSpec::Other => TargetKind::Other,
        }
    }
}

/// A [[targets]] entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Target name
    pub name: String,

    /// Target kind
    pub kind: TargetKindSpec,

    /// Explicit disambiguating id
    #[serde(default)]
    pub id: Option<String>,

    /// Target-level symbol graph defaults
    #[serde(default, rename = "symbol-graph")]
    pub symbol_graph: SymbolGraphSettings,
}

impl TargetSpec {
    /// Convert into a target belonging to `package_name`.
    pub fn to_target(&self, package_name: &str) -> Target {
        let id = self
            .id
            .clone()
            .unwrap_or_else(|| short_id(&[package_name, self.name.as_str()]));
        Target::new(&self.name, id, self.kind.into()).with_symbol_graph(self.symbol_graph)
    }
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse and validate manifest contents.
    pub fn parse(contents: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(contents)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check cross-references between products and targets.
    pub fn validate(&self) -> Result<()> {
        self.package.version()?;

        let mut target_names = HashSet::new();
        for target in &self.targets {
            if !target_names.insert(target.name.as_str()) {
                bail!("duplicate target `{}`", target.name);
            }
        }

        let mut product_names = HashSet::new();
        for product in &self.products {
            if !product_names.insert(product.name.as_str()) {
                bail!("duplicate product `{}`", product.name);
            }
            for member in &product.targets {
                if !target_names.contains(member.as_str()) {
                    bail!(
                        "product `{}` refers to unknown target `{}`",
                        product.name,
                        member
                    );
                }
            }
        }

        Ok(())
    }

    /// Build the package targets in declaration order.
    pub fn build_targets(&self) -> Vec<Target> {
        self.targets
            .iter()
            .map(|t| t.to_target(&self.package.name))
            .collect()
    }
}
