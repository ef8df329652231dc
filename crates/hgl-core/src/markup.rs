//! Generic HGL markup parsing with line tracking.
//!
//! This is the semantics-free view of a spec source: an ordered list of
//! named sections, each holding an ordered list of pairs, every pair carrying
//! the 1-based line it was declared on. It does not know which sections exist
//! or what their pairs mean, so it accepts any section name.
//!
//! # Example
//!
//! ```
//! use hgl_core::markup::Markup;
//!
//! let source = "rewrite:\n    \"c\" -> \"k\"\n\n    \"ph\" -> \"f\"\n";
//! let markup = Markup::parse(source).unwrap();
//!
//! let rewrite = markup.section("rewrite").unwrap();
//! assert_eq!(rewrite.pairs.len(), 2);
//! assert_eq!(rewrite.pairs[1].line, 4);
//! ```

use crate::error::{SpecError, SpecResult};
use crate::lexer::{Token, is_indented, tokenize};

/// The operator between the two sides of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `key = "value"`
    Assign,
    /// `"left" -> "right"`
    Arrow,
}

/// One `left OP right[, right...]` line inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// Left-hand side, either a bare word or a string
    pub left: String,
    pub op: Operator,
    /// Right-hand values in declaration order
    pub right: Vec<String>,
    /// Line number (1-indexed)
    pub line: usize,
}

/// A named section and its pairs in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// Line number of the `name:` header (1-indexed)
    pub line: usize,
    pub pairs: Vec<Pair>,
}

/// The whole document as ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub sections: Vec<Section>,
}

impl Markup {
    /// Parse HGL markup, keeping line numbers for every pair.
    ///
    /// # Errors
    ///
    /// Fails on a pair outside of any section, a repeated section name, or
    /// a line that is neither a section header nor a pair.
    pub fn parse(source: &str) -> SpecResult<Self> {
        let mut sections: Vec<Section> = Vec::new();

        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx + 1;
            let tokens = tokenize(raw, line_no)?;
            if tokens.is_empty() {
                continue;
            }

            if !is_indented(raw) {
                let name = parse_header(&tokens, line_no)?;
                if sections.iter().any(|s| s.name == name) {
                    return Err(SpecError::parse(
                        line_no,
                        format!("duplicate section `{name}`"),
                    ));
                }
                sections.push(Section {
                    name,
                    line: line_no,
                    pairs: Vec::new(),
                });
                continue;
            }

            let Some(section) = sections.last_mut() else {
                return Err(SpecError::parse(line_no, "pair outside of any section"));
            };
            section.pairs.push(parse_pair(tokens, line_no)?);
        }

        Ok(Markup { sections })
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Pairs of a section, or an empty slice if the section is absent
    pub fn pairs(&self, name: &str) -> &[Pair] {
        self.section(name).map(|s| s.pairs.as_slice()).unwrap_or(&[])
    }
}

fn parse_header(tokens: &[Token], line_no: usize) -> SpecResult<String> {
    match tokens {
        [Token::Word(name), Token::Colon] => Ok(name.clone()),
        _ => Err(SpecError::parse(
            line_no,
            "expected a section header like `name:`",
        )),
    }
}

fn parse_pair(tokens: Vec<Token>, line_no: usize) -> SpecResult<Pair> {
    let mut tokens = tokens.into_iter();

    let left = match tokens.next() {
        Some(Token::Str(s)) | Some(Token::Word(s)) => s,
        Some(other) => {
            return Err(SpecError::parse(
                line_no,
                format!("expected a key, found {}", other.describe()),
            ));
        }
        None => return Err(SpecError::parse(line_no, "expected a key")),
    };

    let op = match tokens.next() {
        Some(Token::Equals) => Operator::Assign,
        Some(Token::Arrow) => Operator::Arrow,
        _ => {
            return Err(SpecError::parse(
                line_no,
                format!("expected `=` or `->` after {left:?}"),
            ));
        }
    };

    let mut right = Vec::new();
    loop {
        match tokens.next() {
            Some(Token::Str(value)) => right.push(value),
            Some(other) => {
                return Err(SpecError::parse(
                    line_no,
                    format!("expected a string value, found {}", other.describe()),
                ));
            }
            None => return Err(SpecError::parse(line_no, "missing value")),
        }
        match tokens.next() {
            Some(Token::Comma) => continue,
            None => break,
            Some(other) => {
                return Err(SpecError::parse(
                    line_no,
                    format!("expected `,` between values, found {}", other.describe()),
                ));
            }
        }
    }

    Ok(Pair {
        left,
        op,
        right,
        line: line_no,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"# sample
lang:
    id      = "ita"
    codes   = "it", "ita"

rewrite:
    "^gli" -> "li"

    # spacing and comments don't shift numbering
    "c"    -> "k"

transcribe:
    "k" -> "ㅋ"
"#;

    #[test]
    fn test_sections_in_order() {
        let markup = Markup::parse(SOURCE).unwrap();
        let names: Vec<&str> = markup.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["lang", "rewrite", "transcribe"]);
    }

    #[test]
    fn test_pair_lines() {
        let markup = Markup::parse(SOURCE).unwrap();
        let lines: Vec<usize> = markup.pairs("rewrite").iter().map(|p| p.line).collect();
        assert_eq!(lines, vec![7, 10]);
        assert_eq!(markup.pairs("transcribe")[0].line, 13);
    }

    #[test]
    fn test_multiple_values() {
        let markup = Markup::parse(SOURCE).unwrap();
        let codes = &markup.pairs("lang")[1];
        assert_eq!(codes.left, "codes");
        assert_eq!(codes.op, Operator::Assign);
        assert_eq!(codes.right, vec!["it".to_string(), "ita".to_string()]);
    }

    #[test]
    fn test_missing_section_is_empty() {
        let markup = Markup::parse(SOURCE).unwrap();
        assert!(markup.section("test").is_none());
        assert!(markup.pairs("test").is_empty());
    }

    #[test]
    fn test_unknown_sections_are_accepted() {
        let markup = Markup::parse("anything:\n    x = \"y\"\n").unwrap();
        assert_eq!(markup.pairs("anything").len(), 1);
    }

    #[test]
    fn test_pair_before_section() {
        let err = Markup::parse("    \"a\" -> \"b\"\n").unwrap_err();
        assert!(err.to_string().contains("outside of any section"));
    }

    #[test]
    fn test_duplicate_section() {
        let err = Markup::parse("rewrite:\nrewrite:\n").unwrap_err();
        assert!(err.to_string().contains("duplicate section"));
    }

    #[test]
    fn test_missing_value() {
        let err = Markup::parse("rewrite:\n    \"a\" ->\n").unwrap_err();
        match err {
            SpecError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("missing value"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_document() {
        let markup = Markup::parse("").unwrap();
        assert!(markup.sections.is_empty());
    }
}
