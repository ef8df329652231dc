//! Word input for `hgl dev`
//!
//! Words come either from command-line arguments or, when none are given,
//! one per line from a reader (normally stdin). Either way they are consumed
//! one at a time by a single loop, in order.

use std::io::{self, BufRead};
use std::vec;

/// A blocking stream of words.
pub enum WordStream<R> {
    Args(vec::IntoIter<String>),
    Lines(io::Lines<R>),
}

impl<R: BufRead> WordStream<R> {
    /// Use `args` if there are any, otherwise read lines from `reader`
    pub fn new(args: Vec<String>, reader: R) -> Self {
        if args.is_empty() {
            WordStream::Lines(reader.lines())
        } else {
            WordStream::Args(args.into_iter())
        }
    }
}

impl<R: BufRead> Iterator for WordStream<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let word = match self {
                WordStream::Args(args) => args.next().map(Ok),
                WordStream::Lines(lines) => lines
                    .next()
                    .map(|line| line.map(|l| l.trim().to_string())),
            }?;
            match word {
                Ok(w) if w.is_empty() => continue,
                other => return Some(other),
            }
        }
    }
}
