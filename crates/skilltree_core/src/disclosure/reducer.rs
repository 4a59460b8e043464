//! Drill-down reducer: `(tree, state, action) -> (tree', state')`.
//!
//! # Responsibility
//! - Reveal the ancestor chain of a selected node as a vertical spine.
//! - Reveal the selected node's children as a horizontal row when the
//!   selection expands.
//!
//! # Invariants
//! - The reset state shows only the root, at its anchor, with no selection.
//! - A selection expands only when the node was already visible and the
//!   tree has been interacted with since the last reset. The first click on
//!   a freshly opened tree therefore only selects the root.
//! - Nodes outside the new visible set keep stale positions; they are never
//!   rendered until a later transition repositions them.
//! - Re-selecting an expanded node yields the same visible set and positions.

use crate::model::skill_node::NodeId;
use crate::model::taxonomy::Tier;
use crate::tree::builder::SkillTree;
use crate::tree::config::spread_x;
use log::debug;
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from disclosure transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisclosureError {
    /// Selected id is not part of the tree.
    NodeNotFound(NodeId),
    /// Parent chain of a node is missing a link or loops.
    BrokenAncestry(NodeId),
}

impl Display for DisclosureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "skill node not found: {id}"),
            Self::BrokenAncestry(id) => {
                write!(f, "skill node has a broken parent chain: {id}")
            }
        }
    }
}

impl Error for DisclosureError {}

/// Visible set plus current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureState {
    visible: BTreeSet<NodeId>,
    selected: Option<NodeId>,
}

impl DisclosureState {
    /// Reset state for a tree: root visible, nothing selected.
    pub fn initial(tree: &SkillTree) -> Self {
        Self {
            visible: BTreeSet::from([tree.root().id.clone()]),
            selected: None,
        }
    }

    pub fn visible(&self) -> &BTreeSet<NodeId> {
        &self.visible
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn from_parts<I: IntoIterator<Item = &'static str>>(
        visible: I,
        selected: Option<&str>,
    ) -> Self {
        Self {
            visible: visible.into_iter().map(str::to_string).collect(),
            selected: selected.map(str::to_string),
        }
    }
}

/// Disclosure input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisclosureAction {
    /// A node was clicked.
    Select(NodeId),
    /// Return to the root-only state.
    Reset,
}

/// Output of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub tree: SkillTree,
    pub state: DisclosureState,
}

/// Applies one action and returns the next tree positions and state.
///
/// # Errors
/// - `NodeNotFound` when `Select` names an unknown id.
/// - `BrokenAncestry` when the parent chain cannot be walked to the root.
pub fn reduce(
    tree: &SkillTree,
    state: &DisclosureState,
    action: &DisclosureAction,
) -> Result<Transition, DisclosureError> {
    match action {
        DisclosureAction::Reset => Ok(reset(tree)),
        DisclosureAction::Select(id) => select(tree, state, id),
    }
}

fn reset(tree: &SkillTree) -> Transition {
    let mut next = tree.clone();
    let anchor = tree.layout().anchor();
    let root_id = tree.root().id.clone();
    if let Some(root) = next.node_mut(&root_id) {
        root.move_to(anchor);
    }
    Transition {
        state: DisclosureState::initial(&next),
        tree: next,
    }
}

fn select(
    tree: &SkillTree,
    state: &DisclosureState,
    clicked_id: &str,
) -> Result<Transition, DisclosureError> {
    let clicked = tree
        .node(clicked_id)
        .ok_or_else(|| DisclosureError::NodeNotFound(clicked_id.to_string()))?;
    let ancestors = ancestor_chain(tree, clicked_id)?;

    let expand = state.selected.is_some() && state.is_visible(clicked_id);
    let children: Vec<NodeId> = if expand {
        tree.children_of(clicked_id)
            .map(|child| child.id.clone())
            .collect()
    } else {
        Vec::new()
    };

    let layout = tree.layout();
    let mut next = tree.clone();

    for (depth, id) in ancestors.iter().enumerate() {
        let y = layout.anchor_y - depth as f64 * layout.spine_step;
        if let Some(node) = next.node_mut(id) {
            node.move_to((layout.anchor_x, y));
        }
    }

    // Skill children are the knowledge tier; they take the compact row one
    // tier further out, centered on the skill's spine position.
    let spine_top = layout.anchor_y - (ancestors.len() - 1) as f64 * layout.spine_step;
    let (row_y, row_step) = if clicked.tier() == Tier::Skill {
        (
            spine_top - 2.0 * layout.spine_step,
            layout.child_step * layout.knowledge_compaction,
        )
    } else {
        (spine_top - layout.spine_step, layout.child_step)
    };
    for (index, id) in children.iter().enumerate() {
        let x = spread_x(layout.anchor_x, row_step, index, children.len());
        if let Some(node) = next.node_mut(id) {
            node.move_to((x, row_y));
        }
    }

    let visible: BTreeSet<NodeId> = ancestors.iter().chain(children.iter()).cloned().collect();
    debug!(
        "event=disclosure_select module=disclosure status=ok node={} expand={} ancestors={} children={}",
        clicked_id,
        expand,
        ancestors.len(),
        children.len()
    );

    Ok(Transition {
        tree: next,
        state: DisclosureState {
            visible,
            selected: Some(clicked_id.to_string()),
        },
    })
}

/// Ids from the root down to `id`, inclusive.
pub fn ancestor_chain(tree: &SkillTree, id: &str) -> Result<Vec<NodeId>, DisclosureError> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut cursor = Some(id.to_string());
    while let Some(current) = cursor {
        if !visited.insert(current.clone()) {
            return Err(DisclosureError::BrokenAncestry(id.to_string()));
        }
        let node = tree
            .node(&current)
            .ok_or_else(|| DisclosureError::BrokenAncestry(id.to_string()))?;
        cursor = node.parent_id.clone();
        chain.push(current);
    }
    chain.reverse();
    Ok(chain)
}
