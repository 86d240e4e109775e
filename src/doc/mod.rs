//! Rich-text document model: paragraphs, runs, and tracked-change containers.
//!
//! A [`Paragraph`] owns an ordered list of [`Node`]s. Every node carries a
//! [`NodeId`] so that callers can address a specific run even when another
//! run holds identical text.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod run;

pub use run::{BreakKind, Deletion, Insertion, Revision, Run, RunContent, RunFormat};

pub type NodeId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

/// Paragraph-level properties. Always precedes the paragraph content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphProperties {
    pub style: Option<String>,
    pub alignment: Option<Alignment>,
}

/// Non-text content such as bookmarks or field markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opaque {
    pub id: NodeId,
    pub tag: String,
}

impl Opaque {
    pub fn new(tag: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            tag: tag.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Run(Run),
    Insertion(Insertion),
    Deletion(Deletion),
    Opaque(Opaque),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Run(run) => run.id,
            Node::Insertion(insertion) => insertion.id,
            Node::Deletion(deletion) => deletion.id,
            Node::Opaque(opaque) => opaque.id,
        }
    }

    pub fn text(&self) -> String {
        match self {
            Node::Run(run) => run.text(),
            Node::Insertion(insertion) => insertion.text(),
            Node::Deletion(deletion) => deletion.text(),
            Node::Opaque(_) => String::new(),
        }
    }

    pub fn as_run(&self) -> Option<&Run> {
        match self {
            Node::Run(run) => Some(run),
            _ => None,
        }
    }
}

impl From<Run> for Node {
    fn from(run: Run) -> Self {
        Node::Run(run)
    }
}

impl From<Insertion> for Node {
    fn from(insertion: Insertion) -> Self {
        Node::Insertion(insertion)
    }
}

impl From<Deletion> for Node {
    fn from(deletion: Deletion) -> Self {
        Node::Deletion(deletion)
    }
}

impl From<Opaque> for Node {
    fn from(opaque: Opaque) -> Self {
        Node::Opaque(opaque)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("node not found")]
    NodeNotFound,
    #[error("node is not a run")]
    NotARun,
    #[error("paragraph index {0} out of range")]
    ParagraphOutOfRange(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Text as it reads with every change applied.
    Current,
    /// Text as it read before any tracked change.
    Original,
    /// Current runs with insertions as `{+...+}` and deletions as `[-...-]`.
    Redline,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub properties: Option<ParagraphProperties>,
    children: Vec<Node>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self {
            properties: None,
            children: Vec::new(),
        }
    }

    pub fn with_runs<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut paragraph = Self::new();
        for text in texts {
            paragraph.append(Run::new(text));
        }
        paragraph
    }

    /// Appends a run holding `text` with an optional character style.
    pub fn add_run(&mut self, text: &str, style: Option<&str>) -> NodeId {
        let mut run = Run::new(text);
        if style.is_some() {
            run.set_style(style);
        }
        self.append(run)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Top-level runs in document order. Runs inside change containers are excluded.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().filter_map(Node::as_run)
    }

    pub fn run(&self, id: NodeId) -> Option<&Run> {
        self.runs().find(|run| run.id == id)
    }

    pub fn run_mut(&mut self, id: NodeId) -> Option<&mut Run> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Run(run) if run.id == id => Some(run),
            _ => None,
        })
    }

    pub fn insertion(&self, id: NodeId) -> Option<&Insertion> {
        self.children.iter().find_map(|node| match node {
            Node::Insertion(insertion) if insertion.id == id => Some(insertion),
            _ => None,
        })
    }

    pub fn insertion_mut(&mut self, id: NodeId) -> Option<&mut Insertion> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Insertion(insertion) if insertion.id == id => Some(insertion),
            _ => None,
        })
    }

    pub fn deletion(&self, id: NodeId) -> Option<&Deletion> {
        self.children.iter().find_map(|node| match node {
            Node::Deletion(deletion) if deletion.id == id => Some(deletion),
            _ => None,
        })
    }

    pub fn deletion_mut(&mut self, id: NodeId) -> Option<&mut Deletion> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Deletion(deletion) if deletion.id == id => Some(deletion),
            _ => None,
        })
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|node| node.id() == id)
    }

    pub fn append(&mut self, node: impl Into<Node>) -> NodeId {
        let node = node.into();
        let id = node.id();
        self.children.push(node);
        id
    }

    /// Inserts `node` as the first content child, after any paragraph properties.
    pub fn prepend(&mut self, node: impl Into<Node>) -> NodeId {
        let node = node.into();
        let id = node.id();
        self.children.insert(0, node);
        id
    }

    pub fn insert_before(
        &mut self,
        anchor: NodeId,
        node: impl Into<Node>,
    ) -> Result<NodeId, EditError> {
        let index = self.position(anchor).ok_or(EditError::NodeNotFound)?;
        let node = node.into();
        let id = node.id();
        self.children.insert(index, node);
        Ok(id)
    }

    pub fn insert_after(
        &mut self,
        anchor: NodeId,
        node: impl Into<Node>,
    ) -> Result<NodeId, EditError> {
        let index = self.position(anchor).ok_or(EditError::NodeNotFound)?;
        let node = node.into();
        let id = node.id();
        self.children.insert(index + 1, node);
        Ok(id)
    }

    pub fn remove_child(&mut self, id: NodeId) -> Result<Node, EditError> {
        let index = self.position(id).ok_or(EditError::NodeNotFound)?;
        Ok(self.children.remove(index))
    }

    pub fn delete_run(&mut self, id: NodeId) -> Result<Run, EditError> {
        let index = self.position(id).ok_or(EditError::NodeNotFound)?;
        match self.children.remove(index) {
            Node::Run(run) => Ok(run),
            other => {
                self.children.insert(index, other);
                Err(EditError::NotARun)
            }
        }
    }

    /// Removes all content. Paragraph properties are preserved.
    pub fn clear(&mut self) -> &mut Self {
        self.children.clear();
        self
    }

    /// Replaces all content with a single unformatted run holding `text`.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.append(Run::new(text));
    }

    pub fn text(&self) -> String {
        self.render(RenderMode::Current)
    }

    pub fn render(&self, mode: RenderMode) -> String {
        let mut output = String::new();
        for node in &self.children {
            match (mode, node) {
                (_, Node::Run(run)) => output.push_str(&run.text()),
                (_, Node::Opaque(_)) => {}
                (RenderMode::Current, Node::Insertion(insertion)) => {
                    output.push_str(&insertion.text())
                }
                (RenderMode::Current, Node::Deletion(_)) => {}
                (RenderMode::Original, Node::Insertion(_)) => {}
                (RenderMode::Original, Node::Deletion(deletion)) => {
                    output.push_str(&deletion.deleted_text())
                }
                (RenderMode::Redline, Node::Insertion(insertion)) => {
                    let text = insertion.text();
                    if !text.is_empty() {
                        output.push_str("{+");
                        output.push_str(&text);
                        output.push_str("+}");
                    }
                }
                (RenderMode::Redline, Node::Deletion(deletion)) => {
                    let text = deletion.deleted_text();
                    if !text.is_empty() {
                        output.push_str("[-");
                        output.push_str(&text);
                        output.push_str("-]");
                    }
                }
            }
        }
        output
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.properties
            .as_ref()
            .and_then(|properties| properties.alignment)
    }

    pub fn set_alignment(&mut self, alignment: Option<Alignment>) {
        self.properties
            .get_or_insert_with(ParagraphProperties::default)
            .alignment = alignment;
    }

    pub fn style(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|properties| properties.style.as_deref())
    }

    pub fn set_style(&mut self, style: Option<&str>) {
        self.properties
            .get_or_insert_with(ParagraphProperties::default)
            .style = style.map(str::to_string);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
        }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        self.paragraphs.get_mut(index)
    }

    pub(crate) fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    /// Appends a paragraph and returns its index.
    pub fn add_paragraph(&mut self, text: Option<&str>, style: Option<&str>) -> usize {
        self.paragraphs.push(new_paragraph(text, style));
        self.paragraphs.len() - 1
    }

    /// Inserts a paragraph directly before the one at `index`.
    pub fn insert_paragraph_before(
        &mut self,
        index: usize,
        text: Option<&str>,
        style: Option<&str>,
    ) -> Result<usize, EditError> {
        if index >= self.paragraphs.len() {
            return Err(EditError::ParagraphOutOfRange(index));
        }
        self.paragraphs.insert(index, new_paragraph(text, style));
        Ok(index)
    }

    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn new_paragraph(text: Option<&str>, style: Option<&str>) -> Paragraph {
    let mut paragraph = Paragraph::new();
    if let Some(text) = text.filter(|text| !text.is_empty()) {
        paragraph.add_run(text, None);
    }
    if style.is_some() {
        paragraph.set_style(style);
    }
    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let paragraph = Paragraph::with_runs(["Hello ", "world"]);
        assert_eq!(paragraph.text(), "Hello world");
        assert_eq!(paragraph.runs().count(), 2);
    }

    #[test]
    fn test_identical_text_runs_have_distinct_ids() {
        let paragraph = Paragraph::with_runs(["same", "same"]);
        let ids: Vec<_> = paragraph.runs().map(|run| run.id).collect();
        assert_ne!(ids[0], ids[1]);
        assert_eq!(paragraph.position(ids[1]), Some(1));
    }

    #[test]
    fn test_insert_relative_to_anchor() {
        let mut paragraph = Paragraph::with_runs(["a", "c"]);
        let anchor = paragraph.runs().next().unwrap().id;
        paragraph.insert_after(anchor, Run::new("b")).unwrap();
        paragraph.insert_before(anchor, Run::new(">")).unwrap();
        assert_eq!(paragraph.text(), ">abc");

        let missing = Uuid::new_v4();
        assert_eq!(
            paragraph.insert_after(missing, Run::new("x")),
            Err(EditError::NodeNotFound)
        );
    }

    #[test]
    fn test_delete_run_rejects_containers() {
        let mut paragraph = Paragraph::with_runs(["keep"]);
        let deletion_id = paragraph.append(Deletion::new(Revision::default()));
        assert_eq!(paragraph.delete_run(deletion_id), Err(EditError::NotARun));
        assert_eq!(paragraph.position(deletion_id), Some(1));

        let run_id = paragraph.runs().next().unwrap().id;
        let removed = paragraph.delete_run(run_id).unwrap();
        assert_eq!(removed.text(), "keep");
        assert_eq!(paragraph.children().len(), 1);
    }

    #[test]
    fn test_remove_child_returns_node() {
        let mut paragraph = Paragraph::with_runs(["a", "b"]);
        let marker = paragraph.prepend(Opaque::new("bookmarkStart"));
        assert_eq!(paragraph.position(marker), Some(0));

        let removed = paragraph.remove_child(marker).unwrap();
        assert!(matches!(removed, Node::Opaque(ref opaque) if opaque.tag == "bookmarkStart"));
        assert_eq!(paragraph.children().len(), 2);
        assert_eq!(
            paragraph.remove_child(marker).map(|node| node.id()),
            Err(EditError::NodeNotFound)
        );
    }

    #[test]
    fn test_clear_keeps_properties() {
        let mut paragraph = Paragraph::with_runs(["text"]);
        paragraph.set_style(Some("Heading1"));
        paragraph.set_alignment(Some(Alignment::Center));
        paragraph.set_text("replaced");
        assert_eq!(paragraph.text(), "replaced");
        assert_eq!(paragraph.style(), Some("Heading1"));
        assert_eq!(paragraph.alignment(), Some(Alignment::Center));
    }

    #[test]
    fn test_render_modes() {
        let mut paragraph = Paragraph::with_runs(["Hello "]);
        let mut insertion = Insertion::new(Revision::default());
        insertion.add_run("earth", None);
        let mut deletion = Deletion::new(Revision::default());
        deletion.push_run(Run::new("world"));
        paragraph.append(insertion);
        paragraph.append(deletion);
        paragraph.append(Opaque::new("bookmarkStart"));

        assert_eq!(paragraph.render(RenderMode::Current), "Hello earth");
        assert_eq!(paragraph.render(RenderMode::Original), "Hello world");
        assert_eq!(
            paragraph.render(RenderMode::Redline),
            "Hello {+earth+}[-world-]"
        );
    }

    #[test]
    fn test_insert_paragraph_before() {
        let mut doc = Document::new();
        doc.add_paragraph(Some("second"), None);
        let index = doc
            .insert_paragraph_before(0, Some("first"), Some("Title"))
            .unwrap();
        assert_eq!(index, 0);
        assert_eq!(doc.text(), "first\nsecond");
        assert_eq!(doc.paragraphs()[0].style(), Some("Title"));
        assert_eq!(
            doc.insert_paragraph_before(5, None, None),
            Err(EditError::ParagraphOutOfRange(5))
        );
    }
}
