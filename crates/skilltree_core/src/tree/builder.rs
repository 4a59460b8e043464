//! Specialization subtree → positioned skill nodes.
//!
//! # Responsibility
//! - Emit one `SkillNode` per taxonomy entry below (and including) a
//!   specialization, with build-time coordinates, labels, and status.
//! - Index nodes by id for disclosure and rendering.
//!
//! # Invariants
//! - Output order is depth-first, source order; identical input yields an
//!   identical tree.
//! - The root is the only node without `parent_id`, is level 0 and unlocked.
//! - Entries below the knowledge tier are not emitted.

use crate::model::skill_node::{NodeId, NodeStatus, SkillNode};
use crate::model::taxonomy::{TaxonomyEntry, Tier};
use crate::tree::config::LayoutConfig;
use crate::tree::status::{StatusPolicy, ThresholdStatusPolicy};
use log::{debug, warn};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

const ELLIPSIS: &str = "...";

/// Flat, indexed node set for one specialization.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillTree {
    nodes: Vec<SkillNode>,
    index: HashMap<NodeId, usize>,
    layout: LayoutConfig,
}

impl SkillTree {
    /// Root node (always the first node).
    pub fn root(&self) -> &SkillNode {
        &self.nodes[0]
    }

    pub fn specialization_id(&self) -> &str {
        &self.root().id
    }

    /// All nodes in build order.
    pub fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&SkillNode> {
        self.index.get(id).map(|&position| &self.nodes[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Layout the tree was built with; disclosure reuses it.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Nodes whose `parent_id` is `id`, in build order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a SkillNode> + 'a {
        self.nodes
            .iter()
            .filter(move |node| node.parent_id.as_deref() == Some(id))
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut SkillNode> {
        let position = *self.index.get(id)?;
        self.nodes.get_mut(position)
    }
}

/// Builds a tree with default layout and threshold status policy.
pub fn build_tree(specialization: &TaxonomyEntry) -> SkillTree {
    build_tree_with(
        specialization,
        &LayoutConfig::default(),
        &ThresholdStatusPolicy::default(),
    )
}

/// Builds a tree with explicit layout and status policy.
pub fn build_tree_with<P: StatusPolicy + ?Sized>(
    specialization: &TaxonomyEntry,
    layout: &LayoutConfig,
    policy: &P,
) -> SkillTree {
    let root = SkillNode {
        id: specialization.id.clone(),
        label: truncate_label(
            &specialization.name,
            layout.label_limits.for_tier(Tier::Specialization),
        ),
        full_name: specialization.name.clone(),
        status: NodeStatus::Unlocked,
        level: 0,
        x: layout.anchor_x,
        y: layout.anchor_y,
        connections: Vec::new(),
        parent_id: None,
        description: specialization.description.clone().unwrap_or_default(),
    };

    let mut nodes = vec![root];
    push_children(&mut nodes, 0, specialization, Tier::Ability, layout, policy);

    let mut index = HashMap::with_capacity(nodes.len());
    for (position, node) in nodes.iter().enumerate() {
        if let Entry::Vacant(slot) = index.entry(node.id.clone()) {
            slot.insert(position);
        } else {
            warn!(
                "event=tree_build module=tree status=warn reason=duplicate_id id={}",
                node.id
            );
        }
    }

    debug!(
        "event=tree_build module=tree status=ok specialization={} nodes={}",
        specialization.id,
        nodes.len()
    );

    SkillTree {
        nodes,
        index,
        layout: *layout,
    }
}

fn push_children<P: StatusPolicy + ?Sized>(
    nodes: &mut Vec<SkillNode>,
    parent_position: usize,
    parent: &TaxonomyEntry,
    tier: Tier,
    layout: &LayoutConfig,
    policy: &P,
) {
    let (Some(row), Some(level)) = (layout.row(tier), tier.level()) else {
        return;
    };
    let count = parent.children.len();
    let parent_x = nodes[parent_position].x;
    let parent_id = nodes[parent_position].id.clone();

    for (sibling_index, child) in parent.children.iter().enumerate() {
        nodes[parent_position].connections.push(child.id.clone());
        nodes.push(SkillNode {
            id: child.id.clone(),
            label: truncate_label(&child.name, layout.label_limits.for_tier(tier)),
            full_name: child.name.clone(),
            status: policy.status(sibling_index, count, tier),
            level,
            x: row.x_for(parent_x, sibling_index, count),
            y: row.y,
            connections: Vec::new(),
            parent_id: Some(parent_id.clone()),
            description: child.description.clone().unwrap_or_default(),
        });

        let position = nodes.len() - 1;
        if let Some(next_tier) = tier.child() {
            push_children(nodes, position, child, next_tier, layout, policy);
        }
    }
}

/// Cuts `name` to `max_chars` characters and appends `...` when cut.
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let mut label = name.chars().take(max_chars).collect::<String>();
    label.push_str(ELLIPSIS);
    label
}

#[cfg(test)]
mod tests {
    use super::{build_tree, truncate_label};
    use crate::disclosure::reducer::{reduce, DisclosureAction, DisclosureState};
    use crate::model::taxonomy::TaxonomyEntry;

    #[test]
    fn truncate_keeps_short_names() {
        assert_eq!(truncate_label("Python", 8), "Python");
        assert_eq!(truncate_label("Exactly8", 8), "Exactly8");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_label("Données avancées", 8), "Données ...");
    }

    #[test]
    fn leaf_specialization_builds_root_only() {
        let tree = build_tree(&TaxonomyEntry::new("solo", "Solo"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().position(), (50.0, 85.0));
        assert!(tree.root().connections.is_empty());
    }

    #[test]
    fn duplicate_id_resolves_to_first_built_node() {
        let tree = build_tree(&TaxonomyEntry::new("ds", "Data").with_children(vec![
            TaxonomyEntry::new("a", "Ability A")
                .with_children(vec![TaxonomyEntry::new("x", "Skill X")]),
            TaxonomyEntry::new("x", "Ability X"),
        ]));

        let node = tree.node("x").expect("x indexed");
        assert_eq!(node.level, 2);
        assert_eq!(node.full_name, "Skill X");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn child_reusing_root_id_keeps_root_selectable() {
        let tree = build_tree(
            &TaxonomyEntry::new("ds", "Data").with_children(vec![TaxonomyEntry::new(
                "ds", "Shadow",
            )]),
        );
        assert!(tree.node("ds").expect("root indexed").is_root());

        let state = DisclosureState::initial(&tree);
        let step = reduce(&tree, &state, &DisclosureAction::Select("ds".to_string()))
            .expect("root stays selectable");
        assert_eq!(step.state.selected(), Some("ds"));
        assert!(step.state.is_visible("ds"));
        assert_eq!(step.tree.root().position(), (50.0, 85.0));
    }
}
