//! Core data structures for graphdoc.
//!
//! This module contains the package model the pipeline reads:
//! - Targets and their closed set of kinds
//! - Products grouping targets
//! - Manifests and the workspace wrapping the root package

pub mod manifest;
pub mod package;
pub mod target;
pub mod workspace;

pub use manifest::Manifest;
pub use package::Package;
pub use target::{ModuleKind, Product, Target, TargetKind};
pub use workspace::{find_manifest, Workspace, MANIFEST_NAME, SCRATCH_DIR_NAME};
