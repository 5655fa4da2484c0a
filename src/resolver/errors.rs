//! Selection error types and diagnostics.

use thiserror::Error;

use crate::core::TargetKind;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error resolving a product/target selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no product named `{name}`")]
    UnknownProduct { name: String, available: Vec<String> },

    #[error("product `{name}` does not contain any documentable targets")]
    ProductHasNoDocumentableTargets {
        name: String,
        documentable_products: Vec<String>,
    },

    #[error("no target named `{name}`")]
    UnknownTarget { name: String, available: Vec<String> },

    #[error("target `{name}` is not a source module")]
    TargetIsNotSourceModule {
        name: String,
        kind: TargetKind,
        documentable: Vec<String>,
    },

    #[error("test target `{name}` is not supported for documentation")]
    TestTargetNotSupported {
        name: String,
        documentable: Vec<String>,
    },

    #[error("package `{package}` does not contain any documentable targets")]
    PackageHasNoDocumentableTargets { package: String },
}

fn listing(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

impl SelectionError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SelectionError::UnknownProduct { name, available } => {
                Diagnostic::error(format!("no product named `{}`", name))
                    .with_context(format!("compatible products: {}", listing(available)))
                    .with_suggestion("Check that the product name is spelled correctly")
                    .with_suggestion(suggestions::LIST_TARGETS)
            }

            SelectionError::ProductHasNoDocumentableTargets {
                name,
                documentable_products,
            } => Diagnostic::error(format!(
                "product `{}` does not contain any documentable targets",
                name
            ))
            .with_context("only library and executable source modules can be documented")
            .with_context(format!(
                "products with documentable targets: {}",
                listing(documentable_products)
            ))
            .with_suggestion(suggestions::LIST_TARGETS),

            SelectionError::UnknownTarget { name, available } => {
                Diagnostic::error(format!("no target named `{}`", name))
                    .with_context(format!("compatible targets: {}", listing(available)))
                    .with_suggestion("Check that the target name is spelled correctly")
                    .with_suggestion(suggestions::LIST_TARGETS)
            }

            SelectionError::TargetIsNotSourceModule {
                name,
                kind,
                documentable,
            } => Diagnostic::error(format!("target `{}` is not a source module", name))
                .with_context(format!("`{}` is a {} target", name, kind))
                .with_context(format!("documentable targets: {}", listing(documentable)))
                .with_suggestion("Select a library or executable target instead"),

            SelectionError::TestTargetNotSupported { name, documentable } => Diagnostic::error(
                format!("test target `{}` is not supported for documentation", name),
            )
            .with_context(format!("documentable targets: {}", listing(documentable)))
            .with_suggestion("Select a library or executable target instead"),

            SelectionError::PackageHasNoDocumentableTargets { package } => Diagnostic::error(
                format!("package `{}` does not contain any documentable targets", package),
            )
            .with_context("only library and executable source modules can be documented")
            .with_suggestion("Add a `library` or `executable` target to Graphdoc.toml"),
        }
    }
}
