//! Runs and tracked-change containers.
//!
//! A [`Run`] is the leaf text node of a paragraph. Its content is kept in
//! normalized form: tabs and line breaks are stored as markers rather than
//! as characters, and are mapped back to `\t` and `\n` when the run's text
//! is read.

use super::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    Line,
    Page,
    Column,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunContent {
    Text(String),
    Tab,
    Break(BreakKind),
    /// Inline image or other non-text content. Renders as nothing.
    Drawing,
}

/// Character-level formatting carried by a run.
///
/// Cloning produces an independent value; no two runs ever share one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFormat {
    pub style: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_name: Option<String>,
    pub size_half_points: Option<u32>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub id: NodeId,
    pub format: Option<RunFormat>,
    content: Vec<RunContent>,
}

impl Run {
    pub fn new(text: &str) -> Self {
        Self::with_format(text, None)
    }

    pub fn with_format(text: &str, format: Option<RunFormat>) -> Self {
        Self {
            id: Uuid::new_v4(),
            format,
            content: normalize(text),
        }
    }

    /// Returns a new run holding `text` with a copy of this run's formatting.
    pub fn fragment(&self, text: &str) -> Run {
        Run::with_format(text, self.format.clone())
    }

    pub fn content(&self) -> &[RunContent] {
        &self.content
    }

    pub fn text(&self) -> String {
        let mut output = String::new();
        for item in &self.content {
            match item {
                RunContent::Text(text) => output.push_str(text),
                RunContent::Tab => output.push('\t'),
                RunContent::Break(_) => output.push('\n'),
                RunContent::Drawing => {}
            }
        }
        output
    }

    /// Replaces all content with `text`. Formatting is preserved.
    pub fn set_text(&mut self, text: &str) {
        self.content = normalize(text);
    }

    pub fn add_text(&mut self, text: &str) {
        self.content.extend(normalize(text));
    }

    pub fn add_tab(&mut self) {
        self.content.push(RunContent::Tab);
    }

    pub fn add_break(&mut self, kind: BreakKind) {
        self.content.push(RunContent::Break(kind));
    }

    pub fn add_drawing(&mut self) {
        self.content.push(RunContent::Drawing);
    }

    /// Removes all content, keeping formatting.
    pub fn clear(&mut self) -> &mut Self {
        self.content.clear();
        self
    }

    pub fn bold(&self) -> Option<bool> {
        self.format.as_ref().and_then(|format| format.bold)
    }

    pub fn set_bold(&mut self, value: Option<bool>) {
        self.format.get_or_insert_with(RunFormat::default).bold = value;
    }

    pub fn italic(&self) -> Option<bool> {
        self.format.as_ref().and_then(|format| format.italic)
    }

    pub fn set_italic(&mut self, value: Option<bool>) {
        self.format.get_or_insert_with(RunFormat::default).italic = value;
    }

    pub fn underline(&self) -> Option<bool> {
        self.format.as_ref().and_then(|format| format.underline)
    }

    pub fn set_underline(&mut self, value: Option<bool>) {
        self.format.get_or_insert_with(RunFormat::default).underline = value;
    }

    pub fn style(&self) -> Option<&str> {
        self.format
            .as_ref()
            .and_then(|format| format.style.as_deref())
    }

    pub fn set_style(&mut self, style: Option<&str>) {
        self.format.get_or_insert_with(RunFormat::default).style = style.map(str::to_string);
    }
}

/// Author and timestamp attached to a tracked change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub author: Option<String>,
    pub date: Option<String>,
}

/// Container for inserted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertion {
    pub id: NodeId,
    pub revision: Revision,
    runs: Vec<Run>,
}

impl Insertion {
    pub fn new(revision: Revision) -> Self {
        Self {
            id: Uuid::new_v4(),
            revision,
            runs: Vec::new(),
        }
    }

    /// Appends a run holding `text`, copying formatting from `original` when given.
    pub fn add_run(&mut self, text: &str, original: Option<&Run>) -> NodeId {
        let run = match original {
            Some(original) => original.fragment(text),
            None => Run::new(text),
        };
        self.push_run(run)
    }

    pub fn push_run(&mut self, run: Run) -> NodeId {
        let id = run.id;
        self.runs.push(run);
        id
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }
}

/// Container for deleted content. Its text is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deletion {
    pub id: NodeId,
    pub revision: Revision,
    runs: Vec<Run>,
}

impl Deletion {
    pub fn new(revision: Revision) -> Self {
        Self {
            id: Uuid::new_v4(),
            revision,
            runs: Vec::new(),
        }
    }

    /// Appends a run holding the deleted `text` with `original`'s formatting.
    pub fn add_deleted(&mut self, original: &Run, text: &str) -> NodeId {
        self.push_run(original.fragment(text))
    }

    pub fn push_run(&mut self, run: Run) -> NodeId {
        let id = run.id;
        self.runs.push(run);
        id
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn text(&self) -> String {
        String::new()
    }

    pub fn deleted_text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }
}

fn normalize(text: &str) -> Vec<RunContent> {
    let mut content = Vec::new();
    let mut pending = String::new();
    for ch in text.chars() {
        let marker = match ch {
            '\t' => RunContent::Tab,
            '\n' | '\r' => RunContent::Break(BreakKind::Line),
            _ => {
                pending.push(ch);
                continue;
            }
        };
        if !pending.is_empty() {
            content.push(RunContent::Text(std::mem::take(&mut pending)));
        }
        content.push(marker);
    }
    if !pending.is_empty() {
        content.push(RunContent::Text(pending));
    }
    content
}
