//! Spec loading and parsing
//!
//! A spec is the semantic view of an HGL source: rewrite rules, transcribe
//! rules and test examples. Rule IDs are dense and 0-based in declaration
//! order within each phase. Source positions are not kept here; the
//! [`markup`](crate::markup) view recovers them when needed.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::{SpecError, SpecResult};
use crate::lexer::{Token, is_indented, tokenize};

/// The two ordered stages of one transcription run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Rewrite,
    Transcribe,
}

impl Phase {
    /// Both phases in execution order
    pub const ALL: [Phase; 2] = [Phase::Rewrite, Phase::Transcribe];

    /// The section name declaring this phase's rules
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Rewrite => "rewrite",
            Phase::Transcribe => "transcribe",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule's left-hand side: literal text with optional `^`/`$` anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    literal: String,
    at_start: bool,
    at_end: bool,
}

impl Pattern {
    /// Parse a pattern from its declared text.
    ///
    /// Returns `None` if nothing is left to match once anchors are removed.
    pub fn new(source: impl Into<String>) -> Option<Self> {
        let source = source.into();
        let mut literal = source.as_str();
        let at_start = literal.starts_with('^');
        if at_start {
            literal = &literal[1..];
        }
        let at_end = literal.ends_with('$');
        if at_end {
            literal = &literal[..literal.len() - 1];
        }
        if literal.is_empty() {
            return None;
        }
        let literal = literal.to_string();
        Some(Self {
            source,
            literal,
            at_start,
            at_end,
        })
    }

    /// The pattern as written in the spec, anchors included
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Replace every match of this pattern in `word`.
    ///
    /// Returns `None` when the pattern does not occur.
    pub fn apply(&self, word: &str, replacement: &str) -> Option<String> {
        let lit = self.literal.as_str();
        match (self.at_start, self.at_end) {
            (true, true) => (word == lit).then(|| replacement.to_string()),
            (true, false) => word
                .strip_prefix(lit)
                .map(|rest| format!("{replacement}{rest}")),
            (false, true) => word
                .strip_suffix(lit)
                .map(|head| format!("{head}{replacement}")),
            (false, false) => word.contains(lit).then(|| word.replace(lit, replacement)),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// One rewrite or transcribe rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// 0-based declaration index within its phase
    pub id: usize,
    pub phase: Phase,
    pub pattern: Pattern,
    pub replacement: String,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {:?}", self.pattern.as_str(), self.replacement)
    }
}

/// An input word and the output the spec promises for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub word: String,
    pub expected: String,
}

/// Key/value metadata from the `lang` and `config` sections
pub type Metadata = BTreeMap<String, Vec<String>>;

/// A parsed spec: rules for both phases plus test examples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spec {
    pub lang: Metadata,
    pub config: Metadata,
    pub rewrite: Vec<Rule>,
    pub transcribe: Vec<Rule>,
    pub test: Vec<Example>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Lang,
    Config,
    Rules(Phase),
    Test,
}

impl SectionKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "lang" => Some(SectionKind::Lang),
            "config" => Some(SectionKind::Config),
            "rewrite" => Some(SectionKind::Rules(Phase::Rewrite)),
            "transcribe" => Some(SectionKind::Rules(Phase::Transcribe)),
            "test" => Some(SectionKind::Test),
            _ => None,
        }
    }
}

impl Spec {
    /// Parse a spec from HGL source text.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Parse`] for malformed markup, unknown sections,
    /// or pairs that don't fit their section.
    pub fn parse(source: &str) -> SpecResult<Self> {
        let mut spec = Spec::default();
        let mut current: Option<SectionKind> = None;
        let mut seen: Vec<SectionKind> = Vec::new();

        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx + 1;
            let tokens = tokenize(raw, line_no)?;
            if tokens.is_empty() {
                continue;
            }

            if !is_indented(raw) {
                let kind = match tokens.as_slice() {
                    [Token::Word(name), Token::Colon] => SectionKind::from_name(name)
                        .ok_or_else(|| {
                            SpecError::parse(line_no, format!("unknown section `{name}`"))
                        })?,
                    _ => {
                        return Err(SpecError::parse(
                            line_no,
                            "expected a section header like `name:`",
                        ));
                    }
                };
                if seen.contains(&kind) {
                    return Err(SpecError::parse(line_no, "duplicate section"));
                }
                seen.push(kind);
                current = Some(kind);
                continue;
            }

            let Some(kind) = current else {
                return Err(SpecError::parse(line_no, "pair outside of any section"));
            };
            let (left, arrow, values) = split_pair(tokens, line_no)?;

            match kind {
                SectionKind::Lang | SectionKind::Config => {
                    if arrow {
                        return Err(SpecError::parse(line_no, "metadata pairs use `=`"));
                    }
                    let table = if kind == SectionKind::Lang {
                        &mut spec.lang
                    } else {
                        &mut spec.config
                    };
                    if table.insert(left.clone(), values).is_some() {
                        return Err(SpecError::parse(
                            line_no,
                            format!("duplicate key `{left}`"),
                        ));
                    }
                }
                SectionKind::Rules(phase) => {
                    let replacement = single_arrow_value(arrow, values, line_no)?;
                    let pattern = Pattern::new(left)
                        .ok_or_else(|| SpecError::parse(line_no, "empty pattern"))?;
                    let rules = match phase {
                        Phase::Rewrite => &mut spec.rewrite,
                        Phase::Transcribe => &mut spec.transcribe,
                    };
                    rules.push(Rule {
                        id: rules.len(),
                        phase,
                        pattern,
                        replacement,
                    });
                }
                SectionKind::Test => {
                    let expected = single_arrow_value(arrow, values, line_no)?;
                    spec.test.push(Example {
                        word: left,
                        expected,
                    });
                }
            }
        }

        Ok(spec)
    }

    /// Read and parse a spec file.
    ///
    /// The file is read fully and closed before parsing starts.
    pub fn load(path: impl AsRef<Path>) -> SpecResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SpecError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Rules of one phase, in ID order
    pub fn rules(&self, phase: Phase) -> &[Rule] {
        match phase {
            Phase::Rewrite => &self.rewrite,
            Phase::Transcribe => &self.transcribe,
        }
    }

    /// Total number of rules across both phases
    pub fn rule_count(&self) -> usize {
        self.rewrite.len() + self.transcribe.len()
    }

    /// First value of a `lang` key, if declared
    pub fn lang_value(&self, key: &str) -> Option<&str> {
        self.lang.get(key).and_then(|v| v.first()).map(String::as_str)
    }
}

/// Returns `(left, uses_arrow, values)`.
fn split_pair(tokens: Vec<Token>, line_no: usize) -> SpecResult<(String, bool, Vec<String>)> {
    let mut tokens = tokens.into_iter();
    let left = match tokens.next() {
        Some(Token::Str(s)) | Some(Token::Word(s)) => s,
        _ => return Err(SpecError::parse(line_no, "expected a key")),
    };
    let arrow = match tokens.next() {
        Some(Token::Arrow) => true,
        Some(Token::Equals) => false,
        _ => return Err(SpecError::parse(line_no, "expected `=` or `->`")),
    };

    let mut values = Vec::new();
    let mut expect_value = true;
    for token in tokens {
        match (expect_value, token) {
            (true, Token::Str(v)) => values.push(v),
            (false, Token::Comma) => {}
            (_, other) => {
                return Err(SpecError::parse(
                    line_no,
                    format!("unexpected {}", other.describe()),
                ));
            }
        }
        expect_value = !expect_value;
    }
    if expect_value {
        return Err(SpecError::parse(line_no, "missing value"));
    }

    Ok((left, arrow, values))
}

fn single_arrow_value(
    arrow: bool,
    mut values: Vec<String>,
    line_no: usize,
) -> SpecResult<String> {
    if !arrow {
        return Err(SpecError::parse(line_no, "rules and tests use `->`"));
    }
    if values.len() != 1 {
        return Err(SpecError::parse(
            line_no,
            format!("expected exactly one value, found {}", values.len()),
        ));
    }
    Ok(values.remove(0))
}
