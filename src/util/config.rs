//! Configuration file support for graphdoc.
//!
//! graphdoc reads two configuration files:
//! - Global: `~/.graphdoc/config.toml` - User-wide defaults
//! - Project: `.graphdoc/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::options::ToolchainCapabilities;

/// Default directory, relative to the package root, holding snippet sources.
pub const DEFAULT_SNIPPETS_DIR: &str = "Snippets";

/// graphdoc configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Symbol graph generator settings
    pub generator: GeneratorConfig,

    /// Snippet extraction settings
    pub snippets: SnippetConfig,

    /// Pipeline settings
    pub build: BuildConfig,
}

/// Symbol graph generator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Path or name of the generator executable
    pub program: Option<PathBuf>,

    /// Whether the generator understands extension block flags
    pub extension_block_symbols: Option<bool>,
}

/// Snippet extraction settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SnippetConfig {
    /// Path or name of the snippet extractor executable
    pub extractor: Option<PathBuf>,

    /// Set to false to never extract snippets
    pub enabled: Option<bool>,

    /// Snippet source directory, relative to the package root
    pub directory: Option<String>,
}

/// Pipeline settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Number of parallel target workers
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.generator.program.is_some() {
            self.generator.program = other.generator.program;
        }
        if other.generator.extension_block_symbols.is_some() {
            self.generator.extension_block_symbols = other.generator.extension_block_symbols;
        }
        if other.snippets.extractor.is_some() {
            self.snippets.extractor = other.snippets.extractor;
        }
        if other.snippets.enabled.is_some() {
            self.snippets.enabled = other.snippets.enabled;
        }
        if other.snippets.directory.is_some() {
            self.snippets.directory = other.snippets.directory;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
    }

    /// Capabilities of the configured generator.
    pub fn capabilities(&self) -> ToolchainCapabilities {
        ToolchainCapabilities {
            extension_block_symbols: self.generator.extension_block_symbols.unwrap_or(true),
        }
    }

    /// Whether snippet extraction is enabled.
    pub fn snippets_enabled(&self) -> bool {
        self.snippets.enabled.unwrap_or(true)
    }

    /// Snippet source directory name.
    pub fn snippets_dir(&self) -> &str {
        self.snippets
            .directory
            .as_deref()
            .unwrap_or(DEFAULT_SNIPPETS_DIR)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.graphdoc/config.toml)
/// 2. Global config (~/.graphdoc/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global graphdoc config directory (~/.graphdoc).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".graphdoc"))
}

/// Get the global config path (~/.graphdoc/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}
