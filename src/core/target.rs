//! Target definitions - the compilable units of a package.
//!
//! Only source-module targets can be documented. Test modules are
//! source modules too, but are never eligible.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::builder::options::SymbolGraphSettings;

/// Sub-kind of a source-module target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Library module
    Library,
    /// Executable module
    Executable,
    /// Test module
    Test,
}

/// The kind of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    /// Built from source code in the package.
    SourceModule(ModuleKind),

    /// Reference to a library provided by the system.
    SystemLibrary,

    /// Prebuilt binary artifact.
    Binary,

    /// Anything else the host build system knows about (plugins, macros, ...).
    Other,
}

impl TargetKind {
    /// Check if this is a source module of any sub-kind.
    pub fn is_source_module(&self) -> bool {
        matches!(self, TargetKind::SourceModule(_))
    }

    /// Check if this is a test source module.
    pub fn is_test(&self) -> bool {
        matches!(self, TargetKind::SourceModule(ModuleKind::Test))
    }

    /// Check if documentation can be generated for this kind.
    pub fn is_documentable(&self) -> bool {
        match self {
            TargetKind::SourceModule(ModuleKind::Library | ModuleKind::Executable) => true,
            TargetKind::SourceModule(ModuleKind::Test)
            | TargetKind::SystemLibrary
            | TargetKind::Binary
            | TargetKind::Other => false,
        }
    }

    /// Manifest spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::SourceModule(ModuleKind::Library) => "library",
            TargetKind::SourceModule(ModuleKind::Executable) => "executable",
            TargetKind::SourceModule(ModuleKind::Test) => "test",
            TargetKind::SystemLibrary => "system-library",
            TargetKind::Binary => "binary",
            TargetKind::Other => "other",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named compilable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Target name, unique within its package
    pub name: String,

    /// Disambiguating id, stable across invocations
    pub id: String,

    /// What kind of unit this is
    pub kind: TargetKind,

    /// Target-level symbol graph defaults
    pub symbol_graph: SymbolGraphSettings,
}

impl Target {
    /// Create a new target with the given name, id, and kind.
    pub fn new(name: impl Into<String>, id: impl Into<String>, kind: TargetKind) -> Self {
        Target {
            name: name.into(),
            id: id.into(),
            kind,
            symbol_graph: SymbolGraphSettings::default(),
        }
    }

    /// Create a library source-module target.
    pub fn library(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(name, id, TargetKind::SourceModule(ModuleKind::Library))
    }

    /// Create an executable source-module target.
    pub fn executable(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(name, id, TargetKind::SourceModule(ModuleKind::Executable))
    }

    /// Create a test source-module target.
    pub fn test(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(name, id, TargetKind::SourceModule(ModuleKind::Test))
    }

    /// Set target-level symbol graph defaults.
    pub fn with_symbol_graph(mut self, settings: SymbolGraphSettings) -> Self {
        self.symbol_graph = settings;
        self
    }

    /// Check if documentation can be generated for this target.
    pub fn is_documentable(&self) -> bool {
        self.kind.is_documentable()
    }

    /// Directory name used for this target's per-target outputs.
    ///
    /// Combines the name with the id so that two packages with
    /// identically-named targets never share a directory.
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.name, self.id)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A publishable build artifact made of an ordered list of targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product name
    pub name: String,

    /// Names of member targets, in product order
    pub targets: Vec<String>,
}

impl Product {
    /// Create a new product.
    pub fn new(
        name: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Product {
            name: name.into(),
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }
}
