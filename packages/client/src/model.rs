//! Outline Model
//!
//! The client's in-memory mirror of the server tree plus all per-node UI
//! state. The model is an explicit, owned value passed to rendering code,
//! not ambient module state.
//!
//! # Optimistic mutation
//!
//! Every mutating method applies its change to local state immediately and
//! returns an [`OutlineCommand`] describing the matching server call. The
//! caller hands the command to the transport; the two sides are not
//! transactionally linked, so a failed request leaves them diverged until
//! the next full reload.
//!
//! # Adjacency map
//!
//! Child lists are kept in an id-to-children map that is updated
//! incrementally on every add, move, and delete. The `droppable` flag of an
//! affected parent is recomputed from that map, never by scanning the whole
//! item list.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Id of the tree root on the server
pub const ROOT_ID: i64 = 1;

/// One node as the client sees it: the server row plus the derived
/// `droppable` flag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
    pub id: i64,
    pub label: String,
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub droppable: bool,
}

/// A server call requested by an optimistic mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineCommand {
    /// POST /api/treeviews; the response id replaces `provisional_id`
    Create {
        provisional_id: i64,
        label: String,
        parent_id: i64,
    },
    /// PUT /api/treeviews/:id
    Rename { id: i64, label: String },
    /// DELETE /api/treeviews/:id
    Delete { id: i64 },
    /// PUT /api/treeviews/:id/move
    Move { id: i64, new_parent_id: i64 },
}

/// Owned client application state
#[derive(Debug)]
pub struct OutlineModel {
    /// All known nodes, keyed by id
    items: HashMap<i64, TreeItem>,
    /// Incrementally maintained adjacency: id to ordered child ids
    children: HashMap<i64, Vec<i64>>,
    /// Pending input text per node (edit field or add-child field)
    node_inputs: HashMap<i64, String>,
    /// Node whose add-child input is currently open
    visible_input_node: Option<i64>,
    /// Node currently in the Editing state
    editing_node: Option<i64>,
    /// Nodes currently expanded
    expanded: HashSet<i64>,
    /// Next optimistic id for not-yet-confirmed creates. Counts down from -1
    /// so provisional ids can never collide with server-assigned ones.
    next_provisional_id: i64,
}

impl OutlineModel {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            children: HashMap::new(),
            node_inputs: HashMap::new(),
            visible_input_node: None,
            editing_node: None,
            expanded: HashSet::new(),
            next_provisional_id: -1,
        }
    }

    /// Replace the whole model with a freshly fetched node list
    ///
    /// Expansion state survives for nodes that still exist; transient input
    /// and edit state is dropped.
    pub fn load(&mut self, items: Vec<TreeItem>) {
        self.items.clear();
        self.children.clear();
        self.node_inputs.clear();
        self.visible_input_node = None;
        self.editing_node = None;

        for item in items {
            if let Some(parent_id) = item.parent_id {
                self.children.entry(parent_id).or_default().push(item.id);
            }
            self.items.insert(item.id, item);
        }

        self.expanded.retain(|id| self.items.contains_key(id));
    }

    //
    // ACCESSORS
    //

    pub fn item(&self, id: i64) -> Option<&TreeItem> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ordered child ids of a node
    pub fn children_of(&self, id: i64) -> &[i64] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn input(&self, id: i64) -> &str {
        self.node_inputs.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn editing_node(&self) -> Option<i64> {
        self.editing_node
    }

    pub fn visible_input_node(&self) -> Option<i64> {
        self.visible_input_node
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    //
    // UI STATE
    //

    /// Update the pending input text for a node
    pub fn set_input(&mut self, id: i64, value: impl Into<String>) {
        self.node_inputs.insert(id, value.into());
    }

    /// Show or hide the add-child input under a node
    pub fn toggle_add_input(&mut self, id: i64) {
        self.visible_input_node = if self.visible_input_node == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    /// Enter the Editing state, seeding the input with the current label
    pub fn begin_edit(&mut self, id: i64) {
        if let Some(item) = self.items.get(&id) {
            self.node_inputs.insert(id, item.label.clone());
            self.editing_node = Some(id);
        }
    }

    /// Leave the Editing state without saving
    pub fn cancel_edit(&mut self) {
        self.editing_node = None;
    }

    /// Collapse or expand a node
    pub fn toggle_expanded(&mut self, id: i64) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    //
    // OPTIMISTIC MUTATIONS
    //

    /// Save the pending edit of a node's label
    ///
    /// Applies the new label locally, leaves the Editing state, and returns
    /// the rename command. No-op when the node is unknown.
    pub fn save_edit(&mut self, id: i64) -> Option<OutlineCommand> {
        let label = self.node_inputs.get(&id)?.clone();
        let item = self.items.get_mut(&id)?;

        item.label = label.clone();
        self.editing_node = None;

        Some(OutlineCommand::Rename { id, label })
    }

    /// Add a child under `parent_id` from its pending input text
    ///
    /// Ignores the request when the input is empty or the parent is unknown.
    /// The new item gets a provisional negative id until the server response
    /// is fed back through [`confirm_created`](Self::confirm_created).
    pub fn add_child(&mut self, parent_id: i64) -> Option<OutlineCommand> {
        let label = self.node_inputs.get(&parent_id).cloned()?;
        if label.is_empty() {
            return None;
        }
        if !self.items.contains_key(&parent_id) {
            return None;
        }

        let provisional_id = self.next_provisional_id;
        self.next_provisional_id -= 1;

        self.items.insert(
            provisional_id,
            TreeItem {
                id: provisional_id,
                label: label.clone(),
                parent_id: Some(parent_id),
                droppable: false,
            },
        );
        self.children.entry(parent_id).or_default().push(provisional_id);
        self.refresh_droppable(parent_id);

        self.node_inputs.insert(parent_id, String::new());
        self.visible_input_node = None;

        Some(OutlineCommand::Create {
            provisional_id,
            label,
            parent_id,
        })
    }

    /// Replace a provisional id with the server-assigned one
    pub fn confirm_created(&mut self, provisional_id: i64, assigned_id: i64) {
        let Some(mut item) = self.items.remove(&provisional_id) else {
            return;
        };
        item.id = assigned_id;

        if let Some(parent_id) = item.parent_id {
            if let Some(siblings) = self.children.get_mut(&parent_id) {
                for slot in siblings.iter_mut() {
                    if *slot == provisional_id {
                        *slot = assigned_id;
                    }
                }
            }
        }

        // Children added under the provisional id before confirmation
        if let Some(kids) = self.children.remove(&provisional_id) {
            for kid in &kids {
                if let Some(child) = self.items.get_mut(kid) {
                    child.parent_id = Some(assigned_id);
                }
            }
            self.children.insert(assigned_id, kids);
        }
        if self.expanded.remove(&provisional_id) {
            self.expanded.insert(assigned_id);
        }
        if let Some(input) = self.node_inputs.remove(&provisional_id) {
            self.node_inputs.insert(assigned_id, input);
        }

        self.items.insert(assigned_id, item);
    }

    /// Delete a node and prune its whole local subtree
    ///
    /// Mirrors the server cascade so the adjacency map never holds orphans.
    /// The root cannot be removed.
    pub fn remove_item(&mut self, id: i64) -> Option<OutlineCommand> {
        let item = self.items.get(&id)?;
        let parent_id = item.parent_id?;

        // Iterative subtree collection over the adjacency map
        let mut pending = vec![id];
        let mut doomed = Vec::new();
        while let Some(current) = pending.pop() {
            doomed.push(current);
            if let Some(kids) = self.children.get(&current) {
                pending.extend(kids.iter().copied());
            }
        }

        for gone in &doomed {
            self.items.remove(gone);
            self.children.remove(gone);
            self.node_inputs.remove(gone);
            self.expanded.remove(gone);
            if self.editing_node == Some(*gone) {
                self.editing_node = None;
            }
            if self.visible_input_node == Some(*gone) {
                self.visible_input_node = None;
            }
        }

        if let Some(siblings) = self.children.get_mut(&parent_id) {
            siblings.retain(|sibling| *sibling != id);
        }
        self.refresh_droppable(parent_id);

        Some(OutlineCommand::Delete { id })
    }

    /// Handle a drop of `drag_id` onto `drop_target_id`
    ///
    /// Dropping a node onto itself is a complete no-op: no state change and
    /// no command. The root cannot be dragged. Any other known target is
    /// accepted.
    pub fn handle_drop(&mut self, drag_id: i64, drop_target_id: i64) -> Option<OutlineCommand> {
        if drag_id == drop_target_id {
            return None;
        }
        if !self.items.contains_key(&drop_target_id) {
            return None;
        }

        let old_parent_id = {
            let item = self.items.get(&drag_id)?;
            // The root stays where it is
            item.parent_id?
        };

        if old_parent_id == drop_target_id {
            // Already under this parent; still issue the move, matching the
            // request the drop gesture has always produced
            return Some(OutlineCommand::Move {
                id: drag_id,
                new_parent_id: drop_target_id,
            });
        }

        if let Some(siblings) = self.children.get_mut(&old_parent_id) {
            siblings.retain(|sibling| *sibling != drag_id);
        }
        self.children.entry(drop_target_id).or_default().push(drag_id);

        if let Some(item) = self.items.get_mut(&drag_id) {
            item.parent_id = Some(drop_target_id);
        }

        self.refresh_droppable(drop_target_id);
        self.refresh_droppable(old_parent_id);

        Some(OutlineCommand::Move {
            id: drag_id,
            new_parent_id: drop_target_id,
        })
    }

    /// Recompute a node's droppable flag from the adjacency map
    fn refresh_droppable(&mut self, id: i64) {
        let has_children = self
            .children
            .get(&id)
            .map(|kids| !kids.is_empty())
            .unwrap_or(false);

        if let Some(item) = self.items.get_mut(&id) {
            item.droppable = has_children;
        }
    }
}

impl Default for OutlineModel {
    fn default() -> Self {
        Self::new()
    }
}
