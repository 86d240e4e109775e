//! Locating a target string within a paragraph's runs.
//!
//! Offsets are byte offsets into a run's rendered text and are always
//! computed against the run's current text. Matching happens on the
//! paragraph's run text laid end to end, so a located start is always
//! followed by the target (or by the rest of the paragraph, when the
//! target runs on past it).

use crate::doc::{NodeId, Paragraph};
use tracing::trace;

/// Finds where a candidate string starts or ends inside one run's text.
pub trait RunTextIndex {
    /// Offset of the first byte of `text` within `run_text`.
    fn locate_start(&self, run_text: &str, text: &str) -> Option<usize>;

    /// Offset of the last byte of `text` within `run_text` (inclusive).
    fn locate_end(&self, run_text: &str, text: &str) -> Option<usize>;
}

/// Plain substring search with no approximate fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactIndex;

impl RunTextIndex for ExactIndex {
    fn locate_start(&self, run_text: &str, text: &str) -> Option<usize> {
        if text.is_empty() {
            return None;
        }
        run_text.find(text)
    }

    fn locate_end(&self, run_text: &str, text: &str) -> Option<usize> {
        if text.is_empty() {
            return None;
        }
        run_text.find(text).map(|index| index + text.len() - 1)
    }
}

/// Substring search falling back to dropping whole words from the target
/// until what is left sits at the edge of the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordShorteningIndex;

impl RunTextIndex for WordShorteningIndex {
    fn locate_start(&self, run_text: &str, text: &str) -> Option<usize> {
        if let Some(index) = ExactIndex.locate_start(run_text, text) {
            return Some(index);
        }
        let trimmed = run_text.trim();
        let leading = run_text.len() - run_text.trim_start().len();
        shorten_from_right(text)
            .find(|candidate| trimmed.ends_with(candidate))
            .map(|candidate| leading + trimmed.len() - candidate.len())
    }

    fn locate_end(&self, run_text: &str, text: &str) -> Option<usize> {
        if let Some(index) = ExactIndex.locate_end(run_text, text) {
            return Some(index);
        }
        let trimmed = run_text.trim();
        shorten_from_left(text)
            .find(|candidate| trimmed.starts_with(candidate.as_str()))
            .and_then(|candidate| {
                run_text
                    .find(candidate.as_str())
                    .map(|index| index + candidate.len() - 1)
            })
    }
}

/// Successively shorter prefixes of `text`, each one word shorter than the last.
fn shorten_from_right(text: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(text).filter(|text| !text.is_empty()), |&current| {
        let shorter = current
            .rsplit_once(' ')
            .map(|(head, _)| head)
            .unwrap_or("");
        (!shorter.is_empty()).then_some(shorter)
    })
}

/// Successively shorter suffixes of `text`, each one word shorter than the last.
///
/// A dropped leading word of more than one character that ends in a comma
/// leaves `", "` in front of the remainder.
fn shorten_from_left(text: &str) -> impl Iterator<Item = String> {
    let first = (!text.is_empty()).then(|| text.to_string());
    std::iter::successors(first, |current| {
        let (word, rest) = current.split_once(' ').unwrap_or((current.as_str(), ""));
        let shorter = if word.chars().count() > 1 && word.ends_with(',') {
            format!(", {rest}")
        } else {
            rest.to_string()
        };
        (!shorter.is_empty()).then_some(shorter)
    })
}

/// A located position: a run and a byte offset within its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub run: NodeId,
    pub offset: usize,
}

/// Where a target string begins and ends. The end offset is inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: Option<Boundary>,
    pub end: Option<Boundary>,
}

/// Byte range of one run within the flattened run text.
#[derive(Debug, Clone, Copy)]
struct RunSpan {
    run: NodeId,
    start: usize,
    end: usize,
}

/// The paragraph's top-level run text laid end to end.
#[derive(Debug, Default)]
struct RunLayout {
    text: String,
    spans: Vec<RunSpan>,
}

impl RunLayout {
    fn of(paragraph: &Paragraph) -> Self {
        let mut layout = RunLayout::default();
        for run in paragraph.runs() {
            let start = layout.text.len();
            layout.text.push_str(&run.text());
            layout.spans.push(RunSpan {
                run: run.id,
                start,
                end: layout.text.len(),
            });
        }
        layout
    }

    fn run_text(&self, span: &RunSpan) -> &str {
        &self.text[span.start..span.end]
    }

    /// The run holding byte `global`. Empty runs hold nothing.
    fn boundary_at(&self, global: usize) -> Option<Boundary> {
        self.spans
            .iter()
            .find(|span| span.start <= global && global < span.end)
            .map(|span| Boundary {
                run: span.run,
                offset: global - span.start,
            })
    }

    fn global_offset(&self, boundary: Boundary) -> Option<usize> {
        self.spans
            .iter()
            .find(|span| span.run == boundary.run && boundary.offset < span.end - span.start)
            .map(|span| span.start + boundary.offset)
    }
}

pub struct ParagraphTextLocator<'a> {
    layout: RunLayout,
    index: &'a dyn RunTextIndex,
}

impl<'a> ParagraphTextLocator<'a> {
    pub fn new(paragraph: &Paragraph, index: &'a dyn RunTextIndex) -> Self {
        Self {
            layout: RunLayout::of(paragraph),
            index,
        }
    }

    pub fn locate(&self, text: &str) -> MatchSpan {
        let start = self.find_start(text);
        let end = self.find_end(text, start);
        MatchSpan { start, end }
    }

    /// Where `text` begins: its first occurrence in the run text, or else a
    /// run-level match whose remaining paragraph text is a prefix of `text`.
    pub fn find_start(&self, text: &str) -> Option<Boundary> {
        if text.is_empty() {
            return None;
        }
        if let Some(global) = self.layout.text.find(text) {
            return self.layout.boundary_at(global);
        }
        self.layout.spans.iter().find_map(|span| {
            let offset = self.index.locate_start(self.layout.run_text(span), text)?;
            let rest = self.layout.text.get(span.start + offset..)?;
            if text.starts_with(rest) {
                Some(Boundary {
                    run: span.run,
                    offset,
                })
            } else {
                trace!(run = %span.run, rest, "rejected start, following text differs");
                None
            }
        })
    }

    /// Where `text` ends, given where it starts. Without a start, the end
    /// must close a prefix of the paragraph that is a suffix of `text`.
    pub fn find_end(&self, text: &str, start: Option<Boundary>) -> Option<Boundary> {
        if text.is_empty() {
            return None;
        }
        if let Some(start) = start {
            let global = self.layout.global_offset(start)?;
            let rest = self.layout.text.get(global..)?;
            if !rest.starts_with(text) {
                return None;
            }
            return self.layout.boundary_at(global + text.len() - 1);
        }

        if let Some(global) = self.layout.text.find(text) {
            return self.layout.boundary_at(global + text.len() - 1);
        }
        self.layout.spans.iter().find_map(|span| {
            let offset = self.index.locate_end(self.layout.run_text(span), text)?;
            let head = self.layout.text.get(..span.start + offset + 1)?;
            if text.ends_with(head) {
                Some(Boundary {
                    run: span.run,
                    offset,
                })
            } else {
                trace!(run = %span.run, head, "rejected end, preceding text differs");
                None
            }
        })
    }
}

/// Whether `text`, or a word-aligned prefix of it, starts within the paragraph.
pub fn text_starts_in_paragraph(paragraph: &Paragraph, text: &str) -> bool {
    let body = paragraph.text();
    if !text.is_empty() && body.contains(text) {
        return true;
    }
    shorten_from_right(text).any(|candidate| body.ends_with(candidate))
}

/// Whether `text`, or a word-aligned suffix of it, ends within the paragraph.
pub fn text_ends_in_paragraph(paragraph: &Paragraph, text: &str) -> bool {
    let body = paragraph.text();
    if !text.is_empty() && body.contains(text) {
        return true;
    }
    shorten_from_left(text).any(|candidate| body.starts_with(candidate.as_str()))
}
