//! Symbol graph generation.
//!
//! Options are derived per target, the external generator runs under a
//! process-wide lock, and snippet graphs are merged in afterwards.

pub mod context;
pub mod coordinator;
pub mod generator;
pub mod options;
pub mod snippets;
pub mod unify;

pub use context::BuildContext;
pub use coordinator::{GenerationCoordinator, GenerationLock};
pub use generator::{ProcessGenerator, SymbolGraphGenerator};
pub use options::{
    build_options, AccessLevel, SymbolGraphOptions, SymbolGraphOverrides, ToolchainCapabilities,
};
pub use snippets::{ProcessSnippetExtractor, SnippetExtractor};
pub use unify::{SnippetUnifier, SymbolGraphResult};
