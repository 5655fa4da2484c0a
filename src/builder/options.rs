//! Symbol graph generation options.
//!
//! Options are derived per target: target settings, then package settings,
//! then built-in defaults, with command-line overrides applied last.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::target::{ModuleKind, Target, TargetKind};
use crate::core::Package;

/// Minimum access level of symbols included in a symbol graph.
///
/// Ordered from least to most visible, so `level >= AccessLevel::Internal`
/// reads as "internal and above".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessLevel {
    Private,
    Internal,
    Package,
    Public,
}

impl AccessLevel {
    /// All access levels, least visible first.
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::Private,
        AccessLevel::Internal,
        AccessLevel::Package,
        AccessLevel::Public,
    ];

    /// Get the command-line spelling of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Private => "private",
            AccessLevel::Internal => "internal",
            AccessLevel::Package => "package",
            AccessLevel::Public => "public",
        }
    }

    /// Default minimum access level for a target kind.
    ///
    /// Executables have no public API, so their internal symbols are the
    /// interesting ones.
    pub fn default_for(kind: TargetKind) -> Self {
        match kind {
            TargetKind::SourceModule(ModuleKind::Executable) => AccessLevel::Internal,
            TargetKind::SourceModule(ModuleKind::Library | ModuleKind::Test)
            | TargetKind::SystemLibrary
            | TargetKind::Binary
            | TargetKind::Other => AccessLevel::Public,
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        AccessLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == lower)
            .ok_or_else(|| {
                let expected: Vec<_> = AccessLevel::ALL.iter().map(AccessLevel::as_str).collect();
                format!(
                    "invalid access level '{}'; expected one of: {}",
                    s,
                    expected.join(", ")
                )
            })
    }
}

/// Symbol graph settings as written in a manifest.
///
/// Every field is optional; unset fields fall through to the next layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SymbolGraphSettings {
    pub minimum_access_level: Option<AccessLevel>,
    pub include_synthesized: Option<bool>,
    pub include_extension_blocks: Option<bool>,
}

impl SymbolGraphSettings {
    /// Layer `self` over `fallback`.
    pub fn or(self, fallback: SymbolGraphSettings) -> SymbolGraphSettings {
        SymbolGraphSettings {
            minimum_access_level: self.minimum_access_level.or(fallback.minimum_access_level),
            include_synthesized: self.include_synthesized.or(fallback.include_synthesized),
            include_extension_blocks: self
                .include_extension_blocks
                .or(fallback.include_extension_blocks),
        }
    }
}

/// Final options handed to the symbol graph generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolGraphOptions {
    /// Minimum access level of emitted symbols
    pub minimum_access_level: AccessLevel,

    /// Emit compiler-synthesized members
    pub include_synthesized: bool,

    /// Emit symbols for extensions to types from other modules
    pub include_extension_blocks: bool,
}

impl SymbolGraphOptions {
    /// Package-default options for a target, before any user override.
    pub fn defaults_for(target: &Target, package: &Package) -> Self {
        let settings = target.symbol_graph.or(package.symbol_graph_defaults());
        SymbolGraphOptions {
            minimum_access_level: settings
                .minimum_access_level
                .unwrap_or_else(|| AccessLevel::default_for(target.kind)),
            include_synthesized: settings.include_synthesized.unwrap_or(true),
            include_extension_blocks: settings.include_extension_blocks.unwrap_or(false),
        }
    }

    /// Generator arguments for these options.
    ///
    /// Extension block flags are only passed to generators that know them.
    pub fn to_args(&self, capabilities: ToolchainCapabilities) -> Vec<String> {
        let mut args = vec![
            "--minimum-access-level".to_string(),
            self.minimum_access_level.to_string(),
        ];
        if !self.include_synthesized {
            args.push("--skip-synthesized-members".to_string());
        }
        if capabilities.extension_block_symbols {
            args.push(if self.include_extension_blocks {
                "--emit-extension-block-symbols".to_string()
            } else {
                "--omit-extension-block-symbols".to_string()
            });
        }
        args
    }
}

/// User-supplied overrides from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolGraphOverrides {
    /// Replaces the default minimum access level
    pub minimum_access_level: Option<AccessLevel>,

    /// Forces `include_synthesized = false` when set
    pub skip_synthesized: bool,

    /// Include (`Some(true)`) or exclude (`Some(false)`) extension blocks
    pub extension_blocks: Option<bool>,
}

/// What the installed generator is able to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolchainCapabilities {
    /// Whether the generator understands the extension block flags
    pub extension_block_symbols: bool,
}

impl Default for ToolchainCapabilities {
    fn default() -> Self {
        ToolchainCapabilities {
            extension_block_symbols: true,
        }
    }
}

/// Derive generation options for a target.
///
/// Never fails: an extension block override the toolchain cannot honor is
/// reported as a warning and dropped.
pub fn build_options(
    target: &Target,
    package: &Package,
    overrides: &SymbolGraphOverrides,
    capabilities: ToolchainCapabilities,
) -> SymbolGraphOptions {
    let mut options = SymbolGraphOptions::defaults_for(target, package);

    if let Some(level) = overrides.minimum_access_level {
        options.minimum_access_level = level;
    }

    if overrides.skip_synthesized {
        options.include_synthesized = false;
    }

    if let Some(include) = overrides.extension_blocks {
        if capabilities.extension_block_symbols {
            options.include_extension_blocks = include;
        } else {
            let flag = if include {
                "--include-extended-types"
            } else {
                "--exclude-extended-types"
            };
            tracing::warn!(
                "`{}` is not supported by the installed symbol graph generator; \
                 ignoring it for `{}`",
                flag,
                target.name
            );
        }
    }

    tracing::debug!(
        "symbol graph options for `{}`: access={}, synthesized={}, extension-blocks={}",
        target.name,
        options.minimum_access_level,
        options.include_synthesized,
        options.include_extension_blocks
    );

    options
}
