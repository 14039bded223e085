//! Tree View Rows
//!
//! Pure rendering computation: flattens the [`OutlineModel`] into the list
//! of currently visible rows, depth-first from the root, skipping collapsed
//! subtrees. No DOM, no gesture handling; callers attach those to the rows.

use crate::model::{OutlineModel, ROOT_ID};

/// Pixels of indentation per tree level
pub const INDENT_PX: u32 = 20;

/// One visible row of the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: i64,
    pub label: String,
    /// Distance from the root (the root itself is depth 0)
    pub depth: usize,
    /// Whether the row shows an expand/collapse affordance
    pub droppable: bool,
    pub expanded: bool,
    /// Whether the row is in the Editing state
    pub editing: bool,
    /// Whether the add-child input under this row is open
    pub add_input_visible: bool,
    /// Delete is offered for every node except the root
    pub delete_allowed: bool,
}

impl Row {
    /// Indentation is proportional to tree depth
    pub fn indent_px(&self) -> u32 {
        self.depth as u32 * INDENT_PX
    }
}

/// Flatten the model into its visible rows
///
/// Children appear under their parent only while every ancestor is expanded.
/// The root row is always visible.
pub fn visible_rows(model: &OutlineModel) -> Vec<Row> {
    let mut rows = Vec::new();
    // Explicit stack; children pushed in reverse keep sibling order
    let mut pending = vec![(ROOT_ID, 0usize)];

    while let Some((id, depth)) = pending.pop() {
        let Some(item) = model.item(id) else {
            continue;
        };

        let expanded = model.is_expanded(id);
        rows.push(Row {
            id,
            label: item.label.clone(),
            depth,
            droppable: item.droppable,
            expanded,
            editing: model.editing_node() == Some(id),
            add_input_visible: model.visible_input_node() == Some(id),
            delete_allowed: item.parent_id.is_some(),
        });

        if expanded {
            for child in model.children_of(id).iter().rev() {
                pending.push((*child, depth + 1));
            }
        }
    }

    rows
}
