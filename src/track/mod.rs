//! Tracked-change text replacement.
//!
//! [`replace_tracked`] replaces a span of a paragraph's text while keeping a
//! record of the change: the matched text is moved into a [`Deletion`](crate::doc::Deletion)
//! and the replacement is placed in an [`Insertion`](crate::doc::Insertion), both as paragraph-level
//! siblings of the runs they were cut from. Every run fragment keeps its
//! own copy of the formatting of the run it came from.
//!
//! ```rust
//! use redline::{Paragraph, RenderMode, replace_tracked};
//!
//! let mut paragraph = Paragraph::with_runs(["The quick ", "brown fox"]);
//! replace_tracked(&mut paragraph, "quick brown", Some("slow"));
//!
//! assert_eq!(paragraph.text(), "The slow fox");
//! assert_eq!(paragraph.render(RenderMode::Original), "The quick brown fox");
//! ```

use crate::doc::{Document, NodeId, Paragraph, Revision, Run};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub mod factory;
pub mod locate;
pub mod split;

pub use factory::{ChangeContainers, ChangeElementFactory, Placement};
pub use locate::{
    Boundary, ExactIndex, MatchSpan, ParagraphTextLocator, RunTextIndex, WordShorteningIndex,
    text_ends_in_paragraph, text_starts_in_paragraph,
};
pub use split::{RunPieces, RunSplit, RunSplitter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Exact search, then drop whole words until the remainder sits at a
    /// run edge.
    #[default]
    WordShortening,
    /// Exact substring search only.
    Exact,
}

impl MatchStrategy {
    pub fn index(&self) -> &'static dyn RunTextIndex {
        match self {
            MatchStrategy::WordShortening => &WordShorteningIndex,
            MatchStrategy::Exact => &ExactIndex,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceConfig {
    pub strategy: MatchStrategy,
    pub revision: Revision,
}

impl ReplaceConfig {
    pub fn exact() -> Self {
        Self {
            strategy: MatchStrategy::Exact,
            revision: Revision::default(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.revision.author = Some(author.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.revision.date = Some(date.into());
        self
    }
}

/// What a call to [`replace_tracked`] located and created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub span: MatchSpan,
    pub deletion: NodeId,
    pub insertion: Option<NodeId>,
}

impl ReplaceOutcome {
    /// True when the target was not found and only an empty deletion was added.
    pub fn is_degenerate(&self) -> bool {
        self.span.start.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingStart,
    InMatch,
    Done,
}

/// Replaces `original` with `replacement` as a tracked change using the
/// default configuration. `None` as the replacement records a deletion only.
pub fn replace_tracked(
    paragraph: &mut Paragraph,
    original: &str,
    replacement: Option<&str>,
) -> ReplaceOutcome {
    replace_tracked_with(paragraph, original, replacement, &ReplaceConfig::default())
}

pub fn replace_tracked_with(
    paragraph: &mut Paragraph,
    original: &str,
    replacement: Option<&str>,
    config: &ReplaceConfig,
) -> ReplaceOutcome {
    let span = ParagraphTextLocator::new(paragraph, config.strategy.index()).locate(original);
    let factory = ChangeElementFactory::new(&config.revision);

    let Some(start) = span.start else {
        let containers = factory.degenerate(paragraph);
        debug!(original, "target not found, prepended empty deletion");
        return ReplaceOutcome {
            span,
            deletion: containers.deletion,
            insertion: None,
        };
    };

    // Built before any run is cut, since the boundary runs may not survive the scan.
    let inserted = replacement.map(|text| {
        let source = span
            .end
            .and_then(|end| paragraph.run(end.run))
            .or_else(|| paragraph.run(start.run));
        match source {
            Some(source) => source.fragment(text),
            None => Run::new(text),
        }
    });

    let end = span.end;
    let containers = factory.build(
        paragraph,
        Some(start.run),
        end.map(|end| end.run),
        replacement.is_some(),
    );
    debug!(
        original,
        start_offset = start.offset,
        end_offset = end.map(|end| end.offset),
        placement = ?containers.placement,
        "replacing tracked span"
    );

    let run_ids: Vec<NodeId> = paragraph
        .runs()
        .map(|run| run.id)
        .skip_while(|id| *id != start.run)
        .collect();

    let mut state = ScanState::SeekingStart;
    for id in run_ids {
        let is_end = end.is_some_and(|end| end.run == id);
        state = match state {
            ScanState::SeekingStart if is_end => {
                let b = end.map_or(0, |end| end.offset + 1);
                cut_within(paragraph, containers.deletion, id, start.offset, b);
                ScanState::Done
            }
            ScanState::SeekingStart => {
                cut_tail(paragraph, containers.deletion, id, start.offset);
                ScanState::InMatch
            }
            ScanState::InMatch if is_end => {
                let b = end.map_or(0, |end| end.offset + 1);
                cut_head(paragraph, containers.deletion, id, b);
                ScanState::Done
            }
            ScanState::InMatch => {
                consume(paragraph, containers.deletion, id);
                ScanState::InMatch
            }
            ScanState::Done => break,
        };
        if state == ScanState::Done {
            break;
        }
    }

    if let (Some(insertion_id), Some(run)) = (containers.insertion, inserted)
        && let Some(insertion) = paragraph.insertion_mut(insertion_id)
    {
        insertion.push_run(run);
    }

    ReplaceOutcome {
        span,
        deletion: containers.deletion,
        insertion: containers.insertion,
    }
}

/// Start and end in the same run: `[a, b)` is deleted, the run keeps
/// `[..a]` and `[b..]` becomes a new run after the change containers.
fn cut_within(paragraph: &mut Paragraph, deletion: NodeId, id: NodeId, a: usize, b: usize) {
    let Some(run) = paragraph.run(id) else {
        return;
    };
    let split = RunSplitter::split(run, a, b);
    let keeps_source = split.keeps_source();
    let RunSplit {
        before,
        matched,
        after,
    } = split;

    if let Some(matched) = matched {
        push_deleted(paragraph, deletion, matched);
    }
    if let Some(after) = after
        && let Err(err) = paragraph.insert_after(deletion, after)
    {
        debug!(%err, "trailing fragment dropped");
    }
    truncate_or_remove(paragraph, id, &before, keeps_source);
}

/// Start run only: `[a..]` is deleted and the run keeps `[..a]`.
fn cut_tail(paragraph: &mut Paragraph, deletion: NodeId, id: NodeId, a: usize) {
    let Some(run) = paragraph.run(id) else {
        return;
    };
    let len = run.text().len();
    let split = RunSplitter::split(run, a, len);
    let keeps_source = split.keeps_source();
    if let Some(matched) = split.matched {
        push_deleted(paragraph, deletion, matched);
    }
    truncate_or_remove(paragraph, id, &split.before, keeps_source);
}

/// End run: `[..b]` is deleted and the run keeps `[b..]`.
fn cut_head(paragraph: &mut Paragraph, deletion: NodeId, id: NodeId, b: usize) {
    let Some(run) = paragraph.run(id) else {
        return;
    };
    let split = RunSplitter::split(run, 0, b);
    let remainder = split.after.as_ref().map(Run::text).unwrap_or_default();
    if let Some(matched) = split.matched {
        push_deleted(paragraph, deletion, matched);
    }
    truncate_or_remove(paragraph, id, &remainder, !remainder.is_empty());
}

/// A run wholly inside the match moves into the deletion as it is.
fn consume(paragraph: &mut Paragraph, deletion: NodeId, id: NodeId) {
    if let Ok(run) = paragraph.delete_run(id) {
        trace!(run = %run.id, text = %run.text(), "consumed run");
        push_deleted(paragraph, deletion, run);
    }
}

fn push_deleted(paragraph: &mut Paragraph, deletion: NodeId, run: Run) {
    if let Some(deletion) = paragraph.deletion_mut(deletion) {
        deletion.push_run(run);
    }
}

fn truncate_or_remove(paragraph: &mut Paragraph, id: NodeId, text: &str, keep: bool) {
    if keep {
        if let Some(run) = paragraph.run_mut(id) {
            run.set_text(text);
        }
    } else if let Err(err) = paragraph.delete_run(id) {
        debug!(run = %id, %err, "emptied run already gone");
    }
}

impl Document {
    /// Applies a tracked replacement to the first paragraph whose text
    /// contains `original`, returning that paragraph's index.
    pub fn replace_tracked(
        &mut self,
        original: &str,
        replacement: Option<&str>,
        config: &ReplaceConfig,
    ) -> Option<(usize, ReplaceOutcome)> {
        if original.is_empty() {
            return None;
        }
        let (index, paragraph) = self
            .paragraphs_mut()
            .iter_mut()
            .enumerate()
            .find(|(_, paragraph)| paragraph.text().contains(original))?;
        let outcome = replace_tracked_with(paragraph, original, replacement, config);
        Some((index, outcome))
    }
}
