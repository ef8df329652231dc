//! hgl library - test HGL transcription specs and measure rule coverage
//!
//! This library exposes the commands of the `hgl` binary for testing and
//! embedding purposes.

pub mod config;
pub mod cover;
pub mod inspect;
pub mod runner;
pub mod words;

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use config::HarnessConfig;
use eyre::{Result, WrapErr};
use hgl_core::{Spec, Transcriber};
use runner::{TestReport, TestRunner};
use tracing::info;
use words::WordStream;

/// Result of `hgl test`
#[derive(Debug)]
pub struct TestOutcome {
    pub report: TestReport,
    /// Fraction of rules fired, when coverage was enabled
    pub coverage: Option<f64>,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.report.passed()
    }
}

/// Run the examples of `files`, then report coverage and write the profile
/// as configured.
///
/// Coverage and the profile are produced even when examples fail.
pub fn run_test(
    files: &[PathBuf],
    config: &HarnessConfig,
    out: &mut impl Write,
) -> Result<TestOutcome> {
    if files.is_empty() {
        eyre::bail!("No spec files specified. Usage: hgl test <file.hgl>...");
    }

    let mut runner = TestRunner::new(config);
    let report = runner.run(files, out)?;
    let tracker = runner.into_tracker();

    if let Some(path) = &config.profile_path {
        write_profile_file(&tracker, path)?;
        info!("wrote coverage profile to {}", path.display());
    }

    let coverage = if tracker.is_enabled() {
        let coverage = tracker.coverage()?;
        writeln!(out, "coverage: {:.1}% of rules", coverage * 100.0)?;
        Some(coverage)
    } else {
        None
    };

    Ok(TestOutcome { report, coverage })
}

fn write_profile_file(tracker: &cover::CoverTracker, path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("Failed to create coverage profile {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    tracker
        .write_profile(&mut writer)
        .wrap_err_with(|| format!("Failed to write coverage profile {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

/// Transcribe a stream of words with one spec, printing either the output
/// alone or the full trace followed by the output.
pub fn run_dev<R: BufRead>(
    spec_path: &Path,
    words: WordStream<R>,
    config: &HarnessConfig,
    out: &mut impl Write,
) -> Result<()> {
    let spec = Spec::load(spec_path)
        .wrap_err_with(|| format!("Failed to load spec {}", spec_path.display()))?;
    let transcriber = Transcriber::new(&spec);

    for word in words {
        let word = word.wrap_err("Failed to read word")?;
        if config.verbose {
            inspect::print_trace(&spec, &word, out)?;
        } else {
            writeln!(out, "{}", transcriber.transcribe(&word))?;
        }
        out.flush()?;
    }

    Ok(())
}
