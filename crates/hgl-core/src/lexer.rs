//! Line tokenizer shared by the markup indexer and the spec parser
//!
//! HGL is line oriented, so tokenizing happens one line at a time. The lexer
//! knows nothing about sections or rules; it only splits a line into quoted
//! strings, bare words and punctuation, dropping `#` comments.

use crate::error::{SpecError, SpecResult};

/// A lexical token on a single HGL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A double-quoted string, with escapes resolved
    Str(String),
    /// A bare identifier such as a section name or a metadata key
    Word(String),
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// `->`
    Arrow,
    /// `,`
    Comma,
}

impl Token {
    /// Short human description, used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Str(s) => format!("string {s:?}"),
            Token::Word(w) => format!("word `{w}`"),
            Token::Colon => "`:`".to_string(),
            Token::Equals => "`=`".to_string(),
            Token::Arrow => "`->`".to_string(),
            Token::Comma => "`,`".to_string(),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

/// Split one source line into tokens.
///
/// `line_no` is only used to build error values.
pub fn tokenize(line: &str, line_no: usize) -> SpecResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {}
            '#' => break,
            ':' => tokens.push(Token::Colon),
            '=' => tokens.push(Token::Equals),
            ',' => tokens.push(Token::Comma),
            '-' => {
                if chars.next_if_eq(&'>').is_some() {
                    tokens.push(Token::Arrow);
                } else {
                    return Err(SpecError::parse(line_no, "expected `->` after `-`"));
                }
            }
            '"' => {
                let mut value = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some('n') => value.push('\n'),
                            Some('t') => value.push('\t'),
                            Some(escaped) => value.push(escaped),
                            None => break,
                        },
                        other => value.push(other),
                    }
                }
                if !closed {
                    return Err(SpecError::parse(line_no, "unterminated string"));
                }
                tokens.push(Token::Str(value));
            }
            c if is_word_char(c) => {
                let mut word = String::new();
                word.push(c);
                while let Some(next) = chars.next_if(|&n| is_word_char(n)) {
                    word.push(next);
                }
                tokens.push(Token::Word(word));
            }
            other => {
                return Err(SpecError::parse(
                    line_no,
                    format!("unexpected character {other:?}"),
                ));
            }
        }
    }

    Ok(tokens)
}

/// Whether a raw line starts with indentation
pub fn is_indented(line: &str) -> bool {
    line.starts_with(|c: char| c == ' ' || c == '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_with_arrow() {
        let tokens = tokenize(r#"    "^gli" -> "li""#, 1).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Str("^gli".into()),
                Token::Arrow,
                Token::Str("li".into())
            ]
        );
    }

    #[test]
    fn test_section_header_and_comment() {
        let tokens = tokenize("rewrite:   # phase one", 3).unwrap();
        assert_eq!(tokens, vec![Token::Word("rewrite".into()), Token::Colon]);
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        let tokens = tokenize(r##"  "#" = "a", "b""##, 1).unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], Token::Str("#".into()));
    }

    #[test]
    fn test_escapes() {
        let tokens = tokenize(r#""a\"b\\c""#, 1).unwrap();
        assert_eq!(tokens, vec![Token::Str("a\"b\\c".into())]);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize(r#"  "abc -> d"#, 7).unwrap_err();
        match err {
            SpecError::Parse { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lone_dash() {
        assert!(tokenize(r#""a" - "b""#, 1).is_err());
    }

    #[test]
    fn test_indentation() {
        assert!(is_indented("    x"));
        assert!(is_indented("\tx"));
        assert!(!is_indented("x:"));
    }
}
