//! Source positions for rules, recovered from the markup view.
//!
//! The spec parser hands out rule IDs but no positions; the markup parser
//! hands out line numbers but no rule semantics. This module pairs them up by
//! declaration index, checking that both views agree on count and order per
//! phase before trusting the result.

use crate::error::{SpecError, SpecResult};
use crate::markup::Markup;
use crate::spec::{Phase, Spec};

/// Where a rule was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionEntry {
    /// Line number (1-indexed)
    pub line: usize,
    /// Length of that line in characters
    pub length: usize,
}

impl PositionEntry {
    /// 1-based column just past the end of the line
    pub fn end_column(&self) -> usize {
        self.length + 1
    }
}

/// Per-phase rule positions for one spec source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionTable {
    rewrite: Vec<PositionEntry>,
    transcribe: Vec<PositionEntry>,
}

impl PositionTable {
    /// Build the table for `spec` from the same `source` it was parsed from.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Parse`] if the markup is malformed, and
    /// [`SpecError::Correlation`] if a phase section holds a different number
    /// of pairs than the spec has rules, or a pair's left side doesn't match
    /// the rule pattern at the same index.
    pub fn build(source: &str, spec: &Spec) -> SpecResult<Self> {
        let markup = Markup::parse(source)?;
        let line_lengths: Vec<usize> = source.lines().map(|l| l.chars().count()).collect();

        let mut table = PositionTable::default();
        for phase in Phase::ALL {
            let rules = spec.rules(phase);
            let pairs = markup.pairs(phase.as_str());
            if pairs.len() != rules.len() {
                return Err(SpecError::correlation(format!(
                    "section `{phase}` has {} pairs but {} rules",
                    pairs.len(),
                    rules.len()
                )));
            }

            let entries = match phase {
                Phase::Rewrite => &mut table.rewrite,
                Phase::Transcribe => &mut table.transcribe,
            };
            for (rule, pair) in rules.iter().zip(pairs) {
                if rule.pattern.as_str() != pair.left {
                    return Err(SpecError::correlation(format!(
                        "{phase} rule {} is {:?} but line {} declares {:?}",
                        rule.id,
                        rule.pattern.as_str(),
                        pair.line,
                        pair.left
                    )));
                }
                let length = line_lengths.get(pair.line - 1).copied().ok_or_else(|| {
                    SpecError::correlation(format!("line {} is past end of source", pair.line))
                })?;
                entries.push(PositionEntry {
                    line: pair.line,
                    length,
                });
            }
        }

        Ok(table)
    }

    /// Position of a rule.
    ///
    /// # Errors
    ///
    /// A missing entry means the two parses diverged; it is reported as
    /// [`SpecError::Correlation`].
    pub fn get(&self, phase: Phase, id: usize) -> SpecResult<PositionEntry> {
        let entries = match phase {
            Phase::Rewrite => &self.rewrite,
            Phase::Transcribe => &self.transcribe,
        };
        entries.get(id).copied().ok_or_else(|| {
            SpecError::correlation(format!("no position recorded for {phase} rule {id}"))
        })
    }

    /// Number of positioned rules in a phase
    pub fn len(&self, phase: Phase) -> usize {
        match phase {
            Phase::Rewrite => self.rewrite.len(),
            Phase::Transcribe => self.transcribe.len(),
        }
    }
}
