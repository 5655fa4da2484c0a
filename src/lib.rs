//! graphdoc - symbol graph orchestration for documentation builds
//!
//! This crate selects documentable targets from a package, runs the
//! external symbol graph generator for each (one invocation at a time),
//! merges in extracted snippet graphs, and lays the results out for a
//! documentation compiler.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test doubles and fixtures for graphdoc unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides stand-ins for the external generator and snippet extractor.
#[cfg(test)]
pub mod test_support;

pub use core::{
    manifest::Manifest, package::Package, target::Product, target::Target,
    workspace::Workspace,
};

pub use resolver::{Selection, SelectionError};
pub use util::context::GlobalContext;
