//! High-level operations.
//!
//! This module contains the implementation of graphdoc commands.

pub mod generate_docs;
pub mod layout;

pub use generate_docs::{document_target, generate_docs, DocsOptions, TargetDocs};
pub use layout::{DocsLayout, DocsPlan, PlannedTarget};
