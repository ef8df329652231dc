//! hgl-core - Core library for HGL transcription specs
//!
//! This crate provides the building blocks for:
//! - Parsing HGL sources into rules and test examples ([`Spec`])
//! - Indexing the same sources generically, with line numbers ([`markup`])
//! - Attributing rules back to source lines ([`PositionTable`])
//! - Running words through a spec's rules, optionally traced ([`Transcriber`])
//!
//! # Spec Sources
//!
//! ```
//! use hgl_core::{Phase, PositionTable, Spec, Transcriber};
//!
//! let source = r#"
//! rewrite:
//!     "c" -> "k"
//!
//! transcribe:
//!     "k" -> "ㅋ"
//!     "a" -> "ㅏ"
//!
//! test:
//!     "ca" -> "ㅋㅏ"
//! "#;
//!
//! let spec = Spec::parse(source).unwrap();
//! assert_eq!(spec.rule_count(), 3);
//!
//! let transcriber = Transcriber::new(&spec);
//! assert_eq!(transcriber.transcribe("ca"), "ㅋㅏ");
//!
//! let positions = PositionTable::build(source, &spec).unwrap();
//! assert_eq!(positions.get(Phase::Transcribe, 1).unwrap().line, 7);
//! ```

mod engine;
mod error;
mod lexer;
pub mod markup;
mod position;
mod spec;

pub use engine::{TraceEntry, Transcriber, Transcription};
pub use error::{SpecError, SpecResult};
pub use lexer::{Token, tokenize};
pub use position::{PositionEntry, PositionTable};
pub use spec::{Example, Metadata, Pattern, Phase, Rule, Spec};
