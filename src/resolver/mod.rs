//! Target selection.
//!
//! Turns the `--product`/`--target` flags into an ordered list of
//! documentable targets:
//! - every requested product expands to its library and executable modules
//! - every requested target must itself be a library or executable module
//!
//! Product expansions come first (in request order), then direct targets
//! (in request order). Nothing is deduplicated: a target reachable through
//! both a product and a direct request appears twice.

pub mod errors;

use crate::core::{ModuleKind, Package, Target, TargetKind};

pub use errors::SelectionError;

/// Products and targets requested on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Requested product names, in request order
    pub products: Vec<String>,

    /// Requested target names, in request order
    pub targets: Vec<String>,
}

impl Selection {
    /// Create a selection from product and target names.
    pub fn new(
        products: impl IntoIterator<Item = impl Into<String>>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Selection {
            products: products.into_iter().map(Into::into).collect(),
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if nothing was explicitly selected.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.targets.is_empty()
    }
}

/// All documentable targets of a package, in declaration order.
pub fn documentable_targets(package: &Package) -> Vec<&Target> {
    package
        .targets()
        .iter()
        .filter(|t| t.is_documentable())
        .collect()
}

fn documentable_names(package: &Package) -> Vec<String> {
    documentable_targets(package)
        .into_iter()
        .map(|t| t.name.clone())
        .collect()
}

fn documentable_product_names(package: &Package) -> Vec<String> {
    package
        .products()
        .iter()
        .filter(|p| package.product_targets(p).any(Target::is_documentable))
        .map(|p| p.name.clone())
        .collect()
}

/// Resolve an explicit selection against a package.
///
/// An empty selection resolves to an empty list.
pub fn resolve<'p>(
    selection: &Selection,
    package: &'p Package,
) -> Result<Vec<&'p Target>, SelectionError> {
    let mut resolved = Vec::new();

    for name in &selection.products {
        let product = package
            .product(name)
            .ok_or_else(|| SelectionError::UnknownProduct {
                name: name.clone(),
                available: package.products().iter().map(|p| p.name.clone()).collect(),
            })?;

        let members: Vec<&Target> = package
            .product_targets(product)
            .filter(|t| t.is_documentable())
            .collect();

        if members.is_empty() {
            return Err(SelectionError::ProductHasNoDocumentableTargets {
                name: name.clone(),
                documentable_products: documentable_product_names(package),
            });
        }

        tracing::debug!(
            "product `{}` expands to {} target(s)",
            name,
            members.len()
        );
        resolved.extend(members);
    }

    for name in &selection.targets {
        let target = package
            .target(name)
            .ok_or_else(|| SelectionError::UnknownTarget {
                name: name.clone(),
                available: package.targets().iter().map(|t| t.name.clone()).collect(),
            })?;

        match target.kind {
            TargetKind::SourceModule(ModuleKind::Test) => {
                return Err(SelectionError::TestTargetNotSupported {
                    name: name.clone(),
                    documentable: documentable_names(package),
                });
            }
            TargetKind::SourceModule(ModuleKind::Library | ModuleKind::Executable) => {
                resolved.push(target)
            }
            TargetKind::SystemLibrary | TargetKind::Binary | TargetKind::Other => {
                return Err(SelectionError::TargetIsNotSourceModule {
                    name: name.clone(),
                    kind: target.kind,
                    documentable: documentable_names(package),
                });
            }
        }
    }

    Ok(resolved)
}

/// Resolve a selection, falling back to every documentable target when
/// nothing was selected.
pub fn resolve_or_default<'p>(
    selection: &Selection,
    package: &'p Package,
) -> Result<Vec<&'p Target>, SelectionError> {
    if !selection.is_empty() {
        return resolve(selection, package);
    }

    let all = documentable_targets(package);
    if all.is_empty() {
        return Err(SelectionError::PackageHasNoDocumentableTargets {
            package: package.name().to_string(),
        });
    }
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Product;
    use crate::test_support::fixtures::{package_with_products, sample_package};

    fn names(targets: &[&Target]) -> Vec<String> {
        targets.iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_empty_selection_resolves_to_nothing() {
        let pkg = sample_package();
        assert!(resolve(&Selection::default(), &pkg).unwrap().is_empty());
    }

    #[test]
    fn test_direct_targets() {
        let pkg = sample_package();
        let selection = Selection::new(Vec::<String>::new(), ["Executable", "Library"]);

        let resolved = resolve(&selection, &pkg).unwrap();
        assert_eq!(names(&resolved), vec!["Executable", "Library"]);
    }

    #[test]
    fn test_product_expands_to_members() {
        let pkg = sample_package();
        let selection = Selection::new(["Executable"], Vec::<String>::new());

        let resolved = resolve(&selection, &pkg).unwrap();
        assert_eq!(names(&resolved), vec!["ExecutableMain"]);
    }

    #[test]
    fn test_products_then_targets_without_dedup() {
        let pkg = package_with_products(
            vec![
                Target::library("A1", "a1"),
                Target::library("A2", "a2"),
                Target::library("B1", "b1"),
            ],
            vec![Product::new("A", ["A1", "A2"]), Product::new("B", ["B1"])],
        );
        let selection = Selection::new(["A", "B"], ["A1"]);

        let resolved = resolve(&selection, &pkg).unwrap();
        assert_eq!(names(&resolved), vec!["A1", "A2", "B1", "A1"]);
    }

    #[test]
    fn test_repeated_requests_are_kept() {
        let pkg = sample_package();
        let selection = Selection::new(Vec::<String>::new(), ["Library", "Library"]);

        let resolved = resolve(&selection, &pkg).unwrap();
        assert_eq!(names(&resolved), vec!["Library", "Library"]);
    }

    #[test]
    fn test_product_filters_ineligible_members() {
        let pkg = package_with_products(
            vec![
                Target::library("Kit", "kit"),
                Target::test("KitTests", "kit-tests"),
                Target::new("zlib", "zlib", TargetKind::SystemLibrary),
            ],
            vec![Product::new("Kit", ["zlib", "KitTests", "Kit"])],
        );

        let resolved = resolve(&Selection::new(["Kit"], Vec::<String>::new()), &pkg).unwrap();
        assert_eq!(names(&resolved), vec!["Kit"]);
    }

    #[test]
    fn test_unknown_product() {
        let pkg = sample_package();
        let err = resolve(&Selection::new(["Nope"], Vec::<String>::new()), &pkg).unwrap_err();

        assert_eq!(
            err,
            SelectionError::UnknownProduct {
                name: "Nope".to_string(),
                available: vec!["Executable".to_string(), "Library".to_string()],
            }
        );
    }

    #[test]
    fn test_product_without_documentable_targets() {
        let pkg = package_with_products(
            vec![
                Target::library("Kit", "kit"),
                Target::test("KitTests", "kit-tests"),
                Target::new("Prebuilt", "prebuilt", TargetKind::Binary),
            ],
            vec![
                Product::new("Kit", ["Kit"]),
                Product::new("Bundle", ["KitTests", "Prebuilt"]),
            ],
        );

        let err = resolve(&Selection::new(["Bundle"], Vec::<String>::new()), &pkg).unwrap_err();
        assert_eq!(
            err,
            SelectionError::ProductHasNoDocumentableTargets {
                name: "Bundle".to_string(),
                documentable_products: vec!["Kit".to_string()],
            }
        );
    }

    #[test]
    fn test_unknown_target() {
        let pkg = sample_package();
        let err = resolve(&Selection::new(Vec::<String>::new(), ["Missing"]), &pkg).unwrap_err();

        match err {
            SelectionError::UnknownTarget { name, available } => {
                assert_eq!(name, "Missing");
                assert!(available.contains(&"Tests".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_test_target_rejected() {
        let pkg = sample_package();
        let err = resolve(&Selection::new(Vec::<String>::new(), ["Tests"]), &pkg).unwrap_err();

        assert!(matches!(
            err,
            SelectionError::TestTargetNotSupported { ref name, .. } if name == "Tests"
        ));
    }

    #[test]
    fn test_non_source_module_rejected() {
        let pkg = sample_package();
        let err = resolve(&Selection::new(Vec::<String>::new(), ["SystemZlib"]), &pkg).unwrap_err();

        assert!(matches!(
            err,
            SelectionError::TargetIsNotSourceModule {
                ref name,
                kind: TargetKind::SystemLibrary,
                ..
            } if name == "SystemZlib"
        ));
    }

    #[test]
    fn test_first_failure_wins() {
        let pkg = sample_package();
        let selection = Selection::new(["Nope"], ["Tests"]);

        let err = resolve(&selection, &pkg).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownProduct { .. }));
    }

    #[test]
    fn test_default_falls_back_to_documentable_targets() {
        let pkg = sample_package();
        let resolved = resolve_or_default(&Selection::default(), &pkg).unwrap();

        assert_eq!(
            names(&resolved),
            vec!["Executable", "ExecutableMain", "Library"]
        );
    }

    #[test]
    fn test_default_on_package_without_documentable_targets() {
        let pkg = package_with_products(vec![Target::test("OnlyTests", "t")], vec![]);
        let err = resolve_or_default(&Selection::default(), &pkg).unwrap_err();

        assert_eq!(
            err,
            SelectionError::PackageHasNoDocumentableTargets {
                package: pkg.name().to_string(),
            }
        );
    }
}
