//! Test doubles for graphdoc unit tests.
//!
//! The symbol graph generator and the snippet extractor are external
//! programs; these stand-ins record how they were called so tests can
//! check ordering and mutual exclusion without a toolchain.
//!
//! # Example
//!
//! ```rust,ignore
//! use graphdoc::test_support::{RecordingGenerator, fixtures::sample_package};
//!
//! let generator = RecordingGenerator::new("/out").with_delay(Duration::from_millis(5));
//! // Share clones of `generator` across coordinators, then inspect:
//! let intervals = generator.intervals();
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};

use crate::builder::generator::SymbolGraphGenerator;
use crate::builder::options::SymbolGraphOptions;
use crate::builder::snippets::SnippetExtractor;
use crate::core::{Package, Target};

#[derive(Debug, Default)]
struct Recording {
    calls: Vec<String>,
    options: Vec<SymbolGraphOptions>,
    intervals: Vec<(Instant, Instant)>,
}

/// Generator that records each call and its start/end time.
///
/// Clones share the same recording.
#[derive(Debug, Clone)]
pub struct RecordingGenerator {
    root: PathBuf,
    delay: Duration,
    write_files: bool,
    recording: Arc<Mutex<Recording>>,
}

impl RecordingGenerator {
    /// Create a generator whose output directories live under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RecordingGenerator {
            root: root.into(),
            delay: Duration::ZERO,
            write_files: false,
            recording: Arc::new(Mutex::new(Recording::default())),
        }
    }

    /// Sleep for `delay` inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Create the output directory with one `<target>.symbols.json` file.
    pub fn writing_files(mut self) -> Self {
        self.write_files = true;
        self
    }

    /// Target names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.recording.lock().unwrap().calls.clone()
    }

    /// Options passed, in call order.
    pub fn options(&self) -> Vec<SymbolGraphOptions> {
        self.recording.lock().unwrap().options.clone()
    }

    /// Start/end time of every call.
    pub fn intervals(&self) -> Vec<(Instant, Instant)> {
        self.recording.lock().unwrap().intervals.clone()
    }
}

impl SymbolGraphGenerator for RecordingGenerator {
    fn generate(
        &self,
        _package: &Package,
        target: &Target,
        options: &SymbolGraphOptions,
    ) -> Result<PathBuf> {
        let start = Instant::now();
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let dir = self.root.join(target.dir_name());
        if self.write_files {
            std::fs::create_dir_all(&dir)?;
            std::fs::write(
                dir.join(format!("{}.symbols.json", target.name)),
                format!("{{\"module\":\"{}\"}}", target.name),
            )?;
        }

        let end = Instant::now();
        let mut recording = self.recording.lock().unwrap();
        recording.calls.push(target.name.clone());
        recording.options.push(*options);
        recording.intervals.push((start, end));
        Ok(dir)
    }
}

/// Generator that always fails with the given message.
#[derive(Debug, Clone)]
pub struct FailingGenerator {
    message: String,
}

impl FailingGenerator {
    /// Create a failing generator.
    pub fn new(message: impl Into<String>) -> Self {
        FailingGenerator {
            message: message.into(),
        }
    }
}

impl SymbolGraphGenerator for FailingGenerator {
    fn generate(
        &self,
        _package: &Package,
        _target: &Target,
        _options: &SymbolGraphOptions,
    ) -> Result<PathBuf> {
        Err(anyhow!(self.message.clone()))
    }
}

/// Snippet extractor that returns a fixed result and counts calls.
#[derive(Debug, Default)]
pub struct StaticSnippetExtractor {
    result: Option<PathBuf>,
    calls: Mutex<usize>,
}

impl StaticSnippetExtractor {
    /// Create an extractor that always yields `result`.
    pub fn new(result: Option<PathBuf>) -> Self {
        StaticSnippetExtractor {
            result,
            calls: Mutex::new(0),
        }
    }

    /// Number of times `extract` was called.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl SnippetExtractor for StaticSnippetExtractor {
    fn extract(&self, _package: &Package, _target: &Target) -> Result<Option<PathBuf>> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.result.clone())
    }
}

/// Mark a script as executable.
#[cfg(unix)]
pub fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}
