//! Geometry and label configuration for built and disclosed trees.
//!
//! All coordinates live in a normalized 0..=100 plane where `y` grows
//! downward, so the root sits near the bottom and deeper tiers rise.

use crate::model::taxonomy::Tier;

/// Horizontal row used for one tier at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Row height.
    pub y: f64,
    /// Distance between neighbouring siblings.
    pub step: f64,
    pub min_x: f64,
    pub max_x: f64,
}

impl RowLayout {
    /// Evenly spreads `count` siblings around `center`, clamped to the row bounds.
    pub fn x_for(&self, center: f64, index: usize, count: usize) -> f64 {
        spread_x(center, self.step, index, count).clamp(self.min_x, self.max_x)
    }
}

/// Maximum label length per tree tier, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelLimits {
    pub specialization: usize,
    pub ability: usize,
    pub skill: usize,
    pub knowledge: usize,
}

impl LabelLimits {
    pub fn for_tier(&self, tier: Tier) -> usize {
        match tier {
            Tier::Domain | Tier::Specialization => self.specialization,
            Tier::Ability => self.ability,
            Tier::Skill => self.skill,
            Tier::Knowledge => self.knowledge,
        }
    }
}

impl Default for LabelLimits {
    fn default() -> Self {
        Self {
            specialization: 15,
            ability: 12,
            skill: 10,
            knowledge: 8,
        }
    }
}

/// Layout constants shared by the builder and the disclosure engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Root anchor x; also the disclosure spine column.
    pub anchor_x: f64,
    /// Root anchor y; also the bottom of the disclosure spine.
    pub anchor_y: f64,
    pub ability_row: RowLayout,
    pub skill_row: RowLayout,
    pub knowledge_row: RowLayout,
    /// Vertical distance between disclosed rows.
    pub spine_step: f64,
    /// Horizontal distance between disclosed children.
    pub child_step: f64,
    /// Multiplier applied to `child_step` for knowledge rows under a skill.
    pub knowledge_compaction: f64,
    pub label_limits: LabelLimits,
}

impl LayoutConfig {
    /// Build-time row for a tier, or `None` for tiers without a row.
    pub fn row(&self, tier: Tier) -> Option<&RowLayout> {
        match tier {
            Tier::Ability => Some(&self.ability_row),
            Tier::Skill => Some(&self.skill_row),
            Tier::Knowledge => Some(&self.knowledge_row),
            Tier::Domain | Tier::Specialization => None,
        }
    }

    pub fn anchor(&self) -> (f64, f64) {
        (self.anchor_x, self.anchor_y)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            anchor_x: 50.0,
            anchor_y: 85.0,
            ability_row: RowLayout {
                y: 65.0,
                step: 40.0,
                min_x: 10.0,
                max_x: 90.0,
            },
            skill_row: RowLayout {
                y: 45.0,
                step: 25.0,
                min_x: 5.0,
                max_x: 95.0,
            },
            knowledge_row: RowLayout {
                y: 25.0,
                step: 15.0,
                min_x: 2.0,
                max_x: 98.0,
            },
            spine_step: 15.0,
            child_step: 20.0,
            knowledge_compaction: 0.7,
            label_limits: LabelLimits::default(),
        }
    }
}

/// Position of sibling `index` when `count` siblings span `step * (count - 1)`
/// centered on `center`. A single sibling sits on the center.
pub fn spread_x(center: f64, step: f64, index: usize, count: usize) -> f64 {
    if count <= 1 {
        return center;
    }
    let width = step * (count - 1) as f64;
    center - width / 2.0 + width * index as f64 / (count - 1) as f64
}
