//! Splitting a run's text at match boundaries.

use crate::doc::Run;

/// The three pieces of a run's text around `[a, b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPieces {
    pub before: String,
    pub matched: String,
    pub after: String,
}

impl RunPieces {
    pub fn rejoin(&self) -> String {
        let mut text =
            String::with_capacity(self.before.len() + self.matched.len() + self.after.len());
        text.push_str(&self.before);
        text.push_str(&self.matched);
        text.push_str(&self.after);
        text
    }
}

/// The outcome of splitting one run: what stays in place and the new
/// fragments, each carrying its own copy of the source run's formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSplit {
    /// Text left in the source run. When empty the source run is dropped.
    pub before: String,
    pub matched: Option<Run>,
    pub after: Option<Run>,
}

impl RunSplit {
    pub fn keeps_source(&self) -> bool {
        !self.before.is_empty()
    }
}

pub struct RunSplitter;

impl RunSplitter {
    /// Cuts `text` into `[..a]`, `[a..b]`, `[b..]`. Offsets past the end are
    /// clamped and offsets inside a character move back to its start.
    pub fn pieces(text: &str, a: usize, b: usize) -> RunPieces {
        let b = floor_char_boundary(text, b);
        let a = floor_char_boundary(text, a).min(b);
        RunPieces {
            before: text[..a].to_string(),
            matched: text[a..b].to_string(),
            after: text[b..].to_string(),
        }
    }

    /// Splits `run` at `[a, b)`. The matched and trailing pieces become new
    /// runs; empty pieces produce no run.
    pub fn split(run: &Run, a: usize, b: usize) -> RunSplit {
        let RunPieces {
            before,
            matched,
            after,
        } = Self::pieces(&run.text(), a, b);
        RunSplit {
            before,
            matched: (!matched.is_empty()).then(|| run.fragment(&matched)),
            after: (!after.is_empty()).then(|| run.fragment(&after)),
        }
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
