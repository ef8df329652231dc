//! Rule coverage tracking and profile output
//!
//! The tracker only remembers file identities and `(file, phase, rule ID)`
//! keys. Totals and source positions are recomputed from the files
//! themselves when a ratio or a profile is asked for, so the tracker never
//! holds on to a loaded [`Spec`].
//!
//! Profiles use the line-coverage record format understood by existing
//! viewers (`go tool cover -html` among them):
//!
//! ```text
//! mode: count
//! ita.hgl:13.1,13.20 1 1
//! ita.hgl:14.1,14.20 1 0
//! ```
//!
//! The last field is presence (0 or 1), not an occurrence count.

use std::collections::{BTreeSet, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use hgl_core::{Phase, PositionTable, Spec, SpecError};
use tracing::debug;

/// Identity of one rule in one spec file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoverageKey {
    pub file: PathBuf,
    pub phase: Phase,
    pub rule_id: usize,
}

#[derive(Debug, Default)]
struct CoverState {
    covered: HashSet<CoverageKey>,
    files: BTreeSet<PathBuf>,
}

/// Accumulates which rules fired across a test run.
///
/// A disabled tracker accepts every call and records nothing.
#[derive(Debug, Default)]
pub struct CoverTracker {
    state: Option<CoverState>,
}

impl CoverTracker {
    /// An enabled, empty tracker
    pub fn new() -> Self {
        Self {
            state: Some(CoverState::default()),
        }
    }

    /// A tracker that ignores everything
    pub fn disabled() -> Self {
        Self { state: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    /// Record that `file` took part in the run, whether or not any of its
    /// rules fire.
    pub fn visit(&mut self, file: &Path) {
        let Some(state) = &mut self.state else {
            return;
        };
        if state.files.insert(file.to_path_buf()) {
            debug!("coverage: visiting {}", file.display());
        }
    }

    /// Mark a rule as fired. Also visits its file.
    pub fn cover(&mut self, file: &Path, phase: Phase, rule_id: usize) {
        let Some(state) = &mut self.state else {
            return;
        };
        state.covered.insert(CoverageKey {
            file: file.to_path_buf(),
            phase,
            rule_id,
        });
        self.visit(file);
    }

    /// Whether a rule has fired so far
    pub fn covered(&self, file: &Path, phase: Phase, rule_id: usize) -> bool {
        let Some(state) = &self.state else {
            return false;
        };
        state.covered.contains(&CoverageKey {
            file: file.to_path_buf(),
            phase,
            rule_id,
        })
    }

    /// Visited files in emission order
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.state
            .iter()
            .flat_map(|state| state.files.iter().map(PathBuf::as_path))
    }

    /// Fraction of rules fired (0.0 - 1.0) across every visited file.
    ///
    /// Each visited file is re-read and re-parsed to count its rules. A file
    /// that can no longer be read or parsed is an error: a ratio without its
    /// denominator would be meaningless.
    pub fn coverage(&self) -> Result<f64> {
        let Some(state) = &self.state else {
            return Ok(0.0);
        };

        let mut total = 0usize;
        for file in &state.files {
            let spec = Spec::load(file)
                .wrap_err_with(|| format!("Failed to count rules in {}", file.display()))?;
            total += spec.rule_count();
        }

        if total == 0 {
            return Ok(if state.files.is_empty() { 0.0 } else { 1.0 });
        }
        Ok(state.covered.len() as f64 / total as f64)
    }

    /// Write a coverage profile for every visited file.
    ///
    /// Within a file, rewrite rules come first, then transcribe rules, each
    /// in ascending ID order.
    ///
    /// # Panics
    ///
    /// Panics on a disabled tracker; callers must only ask for a profile
    /// when coverage was enabled.
    pub fn write_profile(&self, w: &mut impl Write) -> Result<()> {
        let Some(state) = &self.state else {
            panic!("write_profile called on a disabled coverage tracker");
        };

        writeln!(w, "mode: count")?;

        for file in &state.files {
            let source = std::fs::read_to_string(file).map_err(|source| SpecError::Open {
                path: file.clone(),
                source,
            })?;
            let spec = Spec::parse(&source)
                .wrap_err_with(|| format!("Failed to parse {}", file.display()))?;
            let positions = PositionTable::build(&source, &spec)
                .wrap_err_with(|| format!("Failed to index {}", file.display()))?;

            for phase in Phase::ALL {
                for rule in spec.rules(phase) {
                    let pos = positions.get(phase, rule.id).wrap_err_with(|| {
                        format!("Internal error: rule positions diverged in {}", file.display())
                    })?;
                    let hit = u8::from(self.covered(file, phase, rule.id));
                    writeln!(
                        w,
                        "{}:{}.1,{}.{} 1 {}",
                        file.display(),
                        pos.line,
                        pos.line,
                        pos.end_column(),
                        hit
                    )?;
                }
            }
            debug!(
                "coverage: wrote {} records for {}",
                spec.rule_count(),
                file.display()
            );
        }

        Ok(())
    }
}
