//! Running spec examples through the engine

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use hgl_core::{Spec, Transcriber};
use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::cover::CoverTracker;

/// An example whose actual output differs from the expected one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub file: PathBuf,
    pub word: String,
    pub actual: String,
    pub expected: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: \"{}\" -> \"{}\", expected: \"{}\"",
            self.file.display(),
            self.word,
            self.actual,
            self.expected
        )
    }
}

/// Outcome of running examples over one or more spec files
#[derive(Debug, Default)]
pub struct TestReport {
    pub files: usize,
    pub examples: usize,
    pub mismatches: Vec<Mismatch>,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Drives the examples of each spec file through the engine.
pub struct TestRunner {
    tracker: CoverTracker,
}

impl TestRunner {
    pub fn new(config: &HarnessConfig) -> Self {
        let tracker = if config.coverage_enabled || config.profile_path.is_some() {
            CoverTracker::new()
        } else {
            CoverTracker::disabled()
        };
        Self { tracker }
    }

    /// Run every example of every file, in the given order.
    ///
    /// Mismatches are written to `out` as they happen and collected in the
    /// report. A file that cannot be loaded stops the run with an error.
    pub fn run<P: AsRef<Path>>(
        &mut self,
        files: &[P],
        out: &mut impl Write,
    ) -> Result<TestReport> {
        let mut report = TestReport::default();

        for file in files {
            let file = file.as_ref();
            let spec = Spec::load(file)
                .wrap_err_with(|| format!("Failed to load spec {}", file.display()))?;
            self.tracker.visit(file);
            info!(
                "testing {} [{}] ({} examples, {} rules)",
                file.display(),
                spec.lang_value("id").unwrap_or("-"),
                spec.test.len(),
                spec.rule_count()
            );

            let transcriber = Transcriber::new(&spec);
            for example in &spec.test {
                let actual = if self.tracker.is_enabled() {
                    let result = transcriber.transcribe_trace(&example.word);
                    for rule in result.fired() {
                        self.tracker.cover(file, rule.phase, rule.id);
                    }
                    result.output
                } else {
                    transcriber.transcribe(&example.word)
                };
                report.examples += 1;

                if actual == example.expected {
                    continue;
                }

                let mismatch = Mismatch {
                    file: file.to_path_buf(),
                    word: example.word.clone(),
                    actual,
                    expected: example.expected.clone(),
                };
                debug!("mismatch: {mismatch}");
                writeln!(out, "{mismatch}")?;
                report.mismatches.push(mismatch);
            }
            report.files += 1;
        }

        Ok(report)
    }

    pub fn tracker(&self) -> &CoverTracker {
        &self.tracker
    }

    pub fn into_tracker(self) -> CoverTracker {
        self.tracker
    }
}
