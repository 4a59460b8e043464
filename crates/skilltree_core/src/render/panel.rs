//! Detail panel, legend, and hover tooltip.
//!
//! One renderer per surface, parameterized by node and status.

use crate::disclosure::reducer::DisclosureState;
use crate::model::skill_node::{NodeStatus, SkillNode};
use crate::render::scene::{status_palette, StatusPalette};
use crate::tree::builder::SkillTree;
use serde::Serialize;

/// Hint shown when nothing is selected.
pub const EMPTY_SELECTION_HINT: &str = "Select a node to view details";

/// Icon shown next to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusIcon {
    CheckCircle,
    Circle,
    Lock,
}

impl StatusIcon {
    pub fn for_status(status: NodeStatus) -> Self {
        match status {
            NodeStatus::Unlocked => Self::CheckCircle,
            NodeStatus::Available => Self::Circle,
            NodeStatus::Locked => Self::Lock,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckCircle => "check-circle",
            Self::Circle => "circle",
            Self::Lock => "lock",
        }
    }
}

/// Call to action offered for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelAction {
    ReviewContent,
    StartLearning,
}

impl PanelAction {
    pub fn for_status(status: NodeStatus) -> Option<Self> {
        match status {
            NodeStatus::Unlocked => Some(Self::ReviewContent),
            NodeStatus::Available => Some(Self::StartLearning),
            NodeStatus::Locked => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ReviewContent => "Review Content",
            Self::StartLearning => "Start Learning",
        }
    }
}

/// Status sentence shown under the panel title.
pub fn status_message(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Unlocked => "Completed - Well done!",
        NodeStatus::Available => "Ready to learn - Start now!",
        NodeStatus::Locked => "Locked - Complete prerequisites first",
    }
}

/// Detail panel for one selected node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub node_id: String,
    pub title: String,
    pub tier: &'static str,
    pub description: Option<String>,
    pub status: NodeStatus,
    pub status_message: &'static str,
    pub icon: StatusIcon,
    pub palette: StatusPalette,
    pub action: Option<PanelAction>,
}

/// Either the empty-selection hint or a node's panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailView {
    Empty { hint: &'static str },
    Node(DetailPanel),
}

/// Renders the detail view for an optional selection.
pub fn detail_view(node: Option<&SkillNode>) -> DetailView {
    let Some(node) = node else {
        return DetailView::Empty {
            hint: EMPTY_SELECTION_HINT,
        };
    };
    DetailView::Node(DetailPanel {
        node_id: node.id.clone(),
        title: node.full_name.clone(),
        tier: node.tier().display_name(),
        description: Some(node.description.clone()).filter(|text| !text.is_empty()),
        status: node.status,
        status_message: status_message(node.status),
        icon: StatusIcon::for_status(node.status),
        palette: status_palette(node.status),
        action: PanelAction::for_status(node.status),
    })
}

/// One legend row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub status: NodeStatus,
    pub label: &'static str,
    pub palette: StatusPalette,
}

/// Legend rows in unlocked, available, locked order.
pub fn legend() -> Vec<LegendEntry> {
    NodeStatus::ALL
        .into_iter()
        .map(|status| LegendEntry {
            status,
            label: status.display_name(),
            palette: status_palette(status),
        })
        .collect()
}

/// Hover tooltip anchored at the hovered node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub node_id: String,
    pub title: String,
    pub status_label: &'static str,
    pub x: f64,
    pub y: f64,
}

/// Tooltip for `hovered`, or `None` if it is unknown or hidden.
pub fn tooltip(tree: &SkillTree, state: &DisclosureState, hovered: &str) -> Option<Tooltip> {
    if !state.is_visible(hovered) {
        return None;
    }
    let node = tree.node(hovered)?;
    Some(Tooltip {
        node_id: node.id.clone(),
        title: node.full_name.clone(),
        status_label: node.status.display_name(),
        x: node.x,
        y: node.y,
    })
}
