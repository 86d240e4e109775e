//! Placement of insertion and deletion containers around located runs.
//!
//! The resulting node order is fixed:
//!
//! | located        | order                                   |
//! |----------------|-----------------------------------------|
//! | start (± end)  | `[start, Insertion, Deletion, ...]`     |
//! | end only       | `[..., Insertion, Deletion, end]`       |
//! | neither        | `[Deletion, ...]`                       |

use crate::doc::{Deletion, Insertion, NodeId, Paragraph, Revision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    AfterStart,
    BeforeEnd,
    Prepended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeContainers {
    pub deletion: NodeId,
    pub insertion: Option<NodeId>,
    pub placement: Placement,
}

pub struct ChangeElementFactory<'a> {
    revision: &'a Revision,
}

impl<'a> ChangeElementFactory<'a> {
    pub fn new(revision: &'a Revision) -> Self {
        Self { revision }
    }

    /// Creates the containers for a change bounded by `start` and `end`.
    ///
    /// An anchor that is not a child of `paragraph` counts as absent.
    pub fn build(
        &self,
        paragraph: &mut Paragraph,
        start: Option<NodeId>,
        end: Option<NodeId>,
        with_insertion: bool,
    ) -> ChangeContainers {
        let deletion = Deletion::new(self.revision.clone());
        let deletion_id = deletion.id;
        let insertion = with_insertion.then(|| Insertion::new(self.revision.clone()));

        let start_index = start.and_then(|id| paragraph.position(id));
        let end_index = end.and_then(|id| paragraph.position(id));
        let (placement, insertion_id) = match (start_index, end_index) {
            (Some(index), _) => {
                let children = paragraph.children_mut();
                children.insert(index + 1, deletion.into());
                let insertion_id = insertion.map(|insertion| {
                    let id = insertion.id;
                    children.insert(index + 1, insertion.into());
                    id
                });
                (Placement::AfterStart, insertion_id)
            }
            (None, Some(index)) => {
                let children = paragraph.children_mut();
                children.insert(index, deletion.into());
                let insertion_id = insertion.map(|insertion| {
                    let id = insertion.id;
                    children.insert(index, insertion.into());
                    id
                });
                (Placement::BeforeEnd, insertion_id)
            }
            (None, None) => {
                paragraph.prepend(deletion);
                (Placement::Prepended, None)
            }
        };

        ChangeContainers {
            deletion: deletion_id,
            insertion: insertion_id,
            placement,
        }
    }

    /// Prepends an empty deletion for a target that is not in the paragraph.
    pub fn degenerate(&self, paragraph: &mut Paragraph) -> ChangeContainers {
        self.build(paragraph, None, None, false)
    }
}
