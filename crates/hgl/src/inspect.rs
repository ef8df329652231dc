//! Trace printing for interactive spec authoring

use std::io::Write;

use hgl_core::{Spec, TraceEntry, Transcriber};

/// Render one trace entry as a single line.
///
/// Fired slots end with the rule that fired; slots where nothing matched
/// end with `-`.
pub fn format_entry(entry: &TraceEntry<'_>) -> String {
    let rule = match entry.rule {
        Some(rule) => rule.to_string(),
        None => "-".to_string(),
    };
    format!(
        "{:<10} {:?} -> {:?}  {}",
        entry.phase.as_str(),
        entry.before,
        entry.after,
        rule
    )
}

/// Print the full trace of `word`, then its transcription on the last line.
pub fn print_trace(spec: &Spec, word: &str, out: &mut impl Write) -> std::io::Result<()> {
    let result = Transcriber::new(spec).transcribe_trace(word);
    for entry in &result.trace {
        writeln!(out, "{}", format_entry(entry))?;
    }
    writeln!(out, "{}", result.output)
}
