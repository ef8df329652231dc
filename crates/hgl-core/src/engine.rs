//! Rule evaluation
//!
//! Every rule of the rewrite phase is tried once in ID order against the
//! current word, then every rule of the transcribe phase. Each attempt is one
//! evaluation slot; the tracing entry point records all of them.

use crate::spec::{Phase, Rule, Spec};

/// One evaluation slot of a transcription run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry<'s> {
    pub phase: Phase,
    /// The rule that fired, or `None` if the slot's rule didn't match
    pub rule: Option<&'s Rule>,
    /// Word before the slot
    pub before: String,
    /// Word after the slot
    pub after: String,
}

/// Output of a traced run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription<'s> {
    pub output: String,
    pub trace: Vec<TraceEntry<'s>>,
}

impl<'s> Transcription<'s> {
    /// Entries whose rule fired
    pub fn fired(&self) -> impl Iterator<Item = &'s Rule> + '_ {
        self.trace.iter().filter_map(|entry| entry.rule)
    }
}

/// Runs a spec's rules over words.
#[derive(Debug, Clone, Copy)]
pub struct Transcriber<'s> {
    spec: &'s Spec,
}

impl<'s> Transcriber<'s> {
    pub fn new(spec: &'s Spec) -> Self {
        Self { spec }
    }

    /// Transcribe a word without recording a trace
    pub fn transcribe(&self, word: &str) -> String {
        self.run(word, |_| {})
    }

    /// Transcribe a word, recording every evaluation slot in order
    pub fn transcribe_trace(&self, word: &str) -> Transcription<'s> {
        let mut trace = Vec::new();
        let output = self.run(word, |entry| trace.push(entry));
        Transcription { output, trace }
    }

    fn run(&self, word: &str, mut record: impl FnMut(TraceEntry<'s>)) -> String {
        let spec: &'s Spec = self.spec;
        let mut current = word.to_string();

        for phase in Phase::ALL {
            for rule in spec.rules(phase) {
                match rule.pattern.apply(&current, &rule.replacement) {
                    Some(next) => {
                        record(TraceEntry {
                            phase,
                            rule: Some(rule),
                            before: current.clone(),
                            after: next.clone(),
                        });
                        current = next;
                    }
                    None => record(TraceEntry {
                        phase,
                        rule: None,
                        before: current.clone(),
                        after: current.clone(),
                    }),
                }
            }
        }

        current
    }
}
