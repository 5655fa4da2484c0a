//! Serialized symbol graph generation.
//!
//! The generator touches shared on-disk and toolchain state, so only one
//! invocation may run at a time across the whole process. Every worker
//! shares one [`GenerationLock`]; the rest of the pipeline stays parallel.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;

use crate::builder::generator::SymbolGraphGenerator;
use crate::builder::options::SymbolGraphOptions;
use crate::core::{Package, Target};

/// Shared mutual-exclusion handle guarding generator invocations.
///
/// Clones share the same underlying lock.
#[derive(Debug, Clone, Default)]
pub struct GenerationLock {
    inner: Arc<Mutex<()>>,
}

impl GenerationLock {
    /// Create a new, unshared lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the lock is available.
    ///
    /// A poisoned lock only means an earlier generator call panicked; the
    /// guarded state is `()`, so it is safe to keep going.
    pub fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Runs a generator under a [`GenerationLock`].
pub struct GenerationCoordinator<G> {
    generator: G,
    lock: GenerationLock,
}

impl<G: SymbolGraphGenerator> GenerationCoordinator<G> {
    /// Create a coordinator around a generator and a shared lock.
    pub fn new(generator: G, lock: GenerationLock) -> Self {
        GenerationCoordinator { generator, lock }
    }

    /// Get the wrapped generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate symbol graphs for one target.
    ///
    /// Errors from the generator are returned unchanged. The lock is
    /// released on every exit path.
    pub fn generate(
        &self,
        package: &Package,
        target: &Target,
        options: &SymbolGraphOptions,
    ) -> Result<PathBuf> {
        let _guard = self.lock.acquire();
        tracing::debug!("generating symbol graphs for `{}`", target.name);
        let dir = self.generator.generate(package, target, options)?;
        tracing::debug!(
            "symbol graphs for `{}` written to {}",
            target.name,
            dir.display()
        );
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    use crate::test_support::fixtures::sample_package;
    use crate::test_support::{FailingGenerator, RecordingGenerator};

    #[test]
    fn test_returns_generator_output() {
        let pkg = sample_package();
        let target = pkg.target("Library").unwrap();
        let options = SymbolGraphOptions::defaults_for(target, &pkg);
        let coordinator =
            GenerationCoordinator::new(RecordingGenerator::new("/out"), GenerationLock::new());

        let dir = coordinator.generate(&pkg, target, &options).unwrap();
        assert_eq!(dir, PathBuf::from("/out").join(target.dir_name()));
        assert_eq!(coordinator.generator().calls(), vec!["Library".to_string()]);
    }

    #[test]
    fn test_concurrent_calls_never_overlap() {
        let pkg = sample_package();
        let lock = GenerationLock::new();
        let generator = RecordingGenerator::new("/out").with_delay(Duration::from_millis(20));
        let names = ["Executable", "ExecutableMain", "Library"];

        thread::scope(|s| {
            for name in names {
                let coordinator = GenerationCoordinator::new(generator.clone(), lock.clone());
                let pkg = &pkg;
                s.spawn(move || {
                    let target = pkg.target(name).unwrap();
                    let options = SymbolGraphOptions::defaults_for(target, pkg);
                    for _ in 0..3 {
                        coordinator.generate(pkg, target, &options).unwrap();
                    }
                });
            }
        });

        let mut intervals = generator.intervals();
        assert_eq!(intervals.len(), 9);
        intervals.sort_by_key(|(start, _)| *start);
        for pair in intervals.windows(2) {
            assert!(
                pair[0].1 <= pair[1].0,
                "generator calls overlapped: {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_error_propagates_and_releases_lock() {
        let pkg = sample_package();
        let target = pkg.target("Library").unwrap();
        let options = SymbolGraphOptions::defaults_for(target, &pkg);
        let lock = GenerationLock::new();

        let failing = GenerationCoordinator::new(
            FailingGenerator::new("toolchain exploded"),
            lock.clone(),
        );
        let err = failing.generate(&pkg, target, &options).unwrap_err();
        assert_eq!(err.to_string(), "toolchain exploded");

        let working = GenerationCoordinator::new(RecordingGenerator::new("/out"), lock);
        assert!(working.generate(&pkg, target, &options).is_ok());
    }
}
