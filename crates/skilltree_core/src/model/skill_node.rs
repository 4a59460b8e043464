//! Positioned skill tree node.
//!
//! # Responsibility
//! - Hold one built node: identity, labels, status, tree links, position.
//!
//! # Invariants
//! - `id`, `level`, `parent_id`, `connections`, `label`, `full_name` are
//!   fixed once built.
//! - `status`, `x`, `y` may change; positions live in the 0..=100 plane.
//! - `connections` lists exactly the ids whose `parent_id` is this node.

use crate::model::taxonomy::Tier;
use serde::{Deserialize, Serialize};

/// Node id, inherited from the taxonomy entry id.
pub type NodeId = String;

/// Progress status shown for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Completed.
    Unlocked,
    /// Ready to learn.
    Available,
    /// Prerequisites pending.
    Locked,
}

impl NodeStatus {
    pub const ALL: [NodeStatus; 3] = [Self::Unlocked, Self::Available, Self::Locked];

    /// Stable lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unlocked => "unlocked",
            Self::Available => "available",
            Self::Locked => "locked",
        }
    }

    /// Capitalized name used by legend and tooltip.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Unlocked => "Unlocked",
            Self::Available => "Available",
            Self::Locked => "Locked",
        }
    }

    /// Returns whether this status can be entered or reviewed.
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Unlocked | Self::Available)
    }
}

/// One node of a built skill tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillNode {
    pub id: NodeId,
    /// Tier-truncated display label.
    pub label: String,
    /// Untruncated name for detail panel and tooltip.
    pub full_name: String,
    pub status: NodeStatus,
    /// Depth below the specialization root, 0..=3.
    pub level: u8,
    pub x: f64,
    pub y: f64,
    /// Ordered child ids, set at build time.
    pub connections: Vec<NodeId>,
    /// `None` only for the root.
    pub parent_id: Option<NodeId>,
    pub description: String,
}

impl SkillNode {
    /// Tier implied by `level`.
    ///
    /// Built nodes always carry a level in 0..=3; anything deeper reads as
    /// knowledge.
    pub fn tier(&self) -> Tier {
        Tier::from_level(self.level).unwrap_or(Tier::Knowledge)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub(crate) fn move_to(&mut self, (x, y): (f64, f64)) {
        self.x = x;
        self.y = y;
    }
}
