//! Node status derivation.
//!
//! Status is a placeholder for real progress tracking: it depends only on a
//! node's position among its siblings and its tier. Layout code never looks
//! at how a status was produced, so a progress-backed policy can replace
//! this one.

use crate::model::skill_node::NodeStatus;
use crate::model::taxonomy::Tier;

/// Decides a node's status from its place among siblings.
pub trait StatusPolicy {
    fn status(&self, sibling_index: usize, sibling_count: usize, tier: Tier) -> NodeStatus;
}

impl<F> StatusPolicy for F
where
    F: Fn(usize, usize, Tier) -> NodeStatus,
{
    fn status(&self, sibling_index: usize, sibling_count: usize, tier: Tier) -> NodeStatus {
        self(sibling_index, sibling_count, tier)
    }
}

/// Source-order threshold policy.
///
/// Specializations and abilities are always unlocked. Within each sibling
/// group, the first `ceil(percent * count / 100)` skills or knowledge items
/// are available and the rest are locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStatusPolicy {
    pub skill_available_percent: u32,
    pub knowledge_available_percent: u32,
}

impl Default for ThresholdStatusPolicy {
    fn default() -> Self {
        Self {
            skill_available_percent: 70,
            knowledge_available_percent: 30,
        }
    }
}

impl StatusPolicy for ThresholdStatusPolicy {
    fn status(&self, sibling_index: usize, sibling_count: usize, tier: Tier) -> NodeStatus {
        let percent = match tier {
            Tier::Domain | Tier::Specialization | Tier::Ability => return NodeStatus::Unlocked,
            Tier::Skill => self.skill_available_percent,
            Tier::Knowledge => self.knowledge_available_percent,
        };
        if sibling_index < available_count(sibling_count, percent) {
            NodeStatus::Available
        } else {
            NodeStatus::Locked
        }
    }
}

/// Number of available siblings: `ceil(count * percent / 100)`.
///
/// Integer arithmetic keeps exact thresholds such as `0.3 * 100 = 30`.
pub fn available_count(sibling_count: usize, percent: u32) -> usize {
    (sibling_count * percent as usize).div_ceil(100)
}

/// Status under the default threshold policy.
pub fn compute_status(sibling_index: usize, sibling_count: usize, tier: Tier) -> NodeStatus {
    ThresholdStatusPolicy::default().status(sibling_index, sibling_count, tier)
}
