//! redline: Tracked-change text replacement for rich-text paragraphs.
//!
//! This crate replaces spans of paragraph text the way redline editing does,
//! leaving an auditable record of what was deleted and what was inserted.
//! It includes:
//!
//! - **Document model** - Paragraphs of styled runs with insertion and deletion containers
//! - **Text location** - Finding where a target string starts and ends across runs,
//!   with a word-shortening fallback for partial matches
//! - **Tracked replacement** - Splitting runs at match boundaries and emitting
//!   change containers in a fixed order
//!
//! # Quick Start
//!
//! ```rust
//! use redline::{Paragraph, RenderMode, replace_tracked};
//!
//! let mut paragraph = Paragraph::with_runs(["Hello ", "world"]);
//! replace_tracked(&mut paragraph, "world", Some("earth"));
//!
//! assert_eq!(paragraph.text(), "Hello earth");
//! assert_eq!(paragraph.render(RenderMode::Redline), "Hello {+earth+}[-world-]");
//! ```
//!
//! # Features
//!
//! - `cli` - Builds the `redline` command line front end (enabled by default)

// Document model
pub mod doc;

// Locating, splitting, and tracked replacement
pub mod track;

// Re-export doc types
pub use doc::{
    Alignment, BreakKind, Deletion, Document, EditError, Insertion, Node, NodeId, Opaque,
    Paragraph, ParagraphProperties, RenderMode, Revision, Run, RunContent, RunFormat,
};

// Re-export replacement types
pub use track::{
    Boundary, ChangeContainers, ChangeElementFactory, ExactIndex, MatchSpan, MatchStrategy,
    ParagraphTextLocator, Placement, ReplaceConfig, ReplaceOutcome, RunPieces, RunSplit,
    RunSplitter, RunTextIndex, WordShorteningIndex, replace_tracked, replace_tracked_with,
    text_ends_in_paragraph, text_starts_in_paragraph,
};
