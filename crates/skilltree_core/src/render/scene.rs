//! Renderer-neutral scene of visible nodes and edges.

use crate::disclosure::reducer::DisclosureState;
use crate::model::skill_node::{NodeId, NodeStatus};
use crate::tree::builder::SkillTree;
use serde::Serialize;

/// Two-stop gradient for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPalette {
    pub from: &'static str,
    pub to: &'static str,
}

/// Teal for unlocked, violet for available, gray for locked.
pub fn status_palette(status: NodeStatus) -> StatusPalette {
    match status {
        NodeStatus::Unlocked => StatusPalette {
            from: "#14b8a6",
            to: "#0891b2",
        },
        NodeStatus::Available => StatusPalette {
            from: "#8b5cf6",
            to: "#7c3aed",
        },
        NodeStatus::Locked => StatusPalette {
            from: "#9ca3af",
            to: "#6b7280",
        },
    }
}

/// Edge appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    /// Solid, violet, higher opacity.
    Active,
    /// Dashed, light gray, low opacity.
    Inactive,
}

impl EdgeStyle {
    pub fn stroke(self) -> &'static str {
        match self {
            Self::Active => "#8b5cf6",
            Self::Inactive => "#d4d4d8",
        }
    }

    pub fn opacity(self) -> f64 {
        match self {
            Self::Active => 0.6,
            Self::Inactive => 0.3,
        }
    }

    pub fn dash_array(self) -> &'static str {
        match self {
            Self::Active => "0",
            Self::Inactive => "1,1",
        }
    }

    pub fn stroke_width(self) -> f64 {
        0.3
    }
}

/// Active iff the source is unlocked and the target is reachable.
pub fn edge_style(source: NodeStatus, target: NodeStatus) -> EdgeStyle {
    if source == NodeStatus::Unlocked && target.is_reachable() {
        EdgeStyle::Active
    } else {
        EdgeStyle::Inactive
    }
}

/// One visible node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeGlyph {
    pub id: NodeId,
    pub label: String,
    pub full_name: String,
    pub status: NodeStatus,
    pub level: u8,
    pub x: f64,
    pub y: f64,
    pub selected: bool,
    pub hovered: bool,
}

/// One visible edge, parent → child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeGlyph {
    pub source: NodeId,
    pub target: NodeId,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub style: EdgeStyle,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Scene {
    /// Edges first so renderers can paint them under the nodes.
    pub edges: Vec<EdgeGlyph>,
    pub nodes: Vec<NodeGlyph>,
}

impl Scene {
    pub fn node(&self, id: &str) -> Option<&NodeGlyph> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Projects the visible part of `tree` into a scene.
///
/// Connections naming unknown nodes are skipped.
pub fn build_scene(tree: &SkillTree, state: &DisclosureState, hovered: Option<&str>) -> Scene {
    let selected = state.selected();
    let visible_nodes = tree
        .nodes()
        .iter()
        .filter(|node| state.is_visible(&node.id));

    let mut scene = Scene::default();
    for node in visible_nodes {
        for target_id in &node.connections {
            if !state.is_visible(target_id) {
                continue;
            }
            let Some(target) = tree.node(target_id) else {
                continue;
            };
            scene.edges.push(EdgeGlyph {
                source: node.id.clone(),
                target: target.id.clone(),
                from: node.position(),
                to: target.position(),
                style: edge_style(node.status, target.status),
            });
        }

        scene.nodes.push(NodeGlyph {
            id: node.id.clone(),
            label: node.label.clone(),
            full_name: node.full_name.clone(),
            status: node.status,
            level: node.level,
            x: node.x,
            y: node.y,
            selected: selected == Some(node.id.as_str()),
            hovered: hovered == Some(node.id.as_str()),
        });
    }
    scene
}
