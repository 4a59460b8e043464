//! Taxonomy input model.
//!
//! # Responsibility
//! - Mirror the external nested taxonomy shape (`id`, `name`,
//!   `description?`, `children?`).
//! - Name the tiers implied by nesting depth.
//!
//! # Invariants
//! - `children` keeps source order; builders rely on it for status thresholds.
//! - A missing or `null` children list is an empty list.

use serde::{Deserialize, Deserializer, Serialize};

/// One tier of the taxonomy, derived from nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Top-level grouping. Never rendered as a tree node.
    Domain,
    /// Tree root (level 0).
    Specialization,
    /// Level 1.
    Ability,
    /// Level 2.
    Skill,
    /// Level 3. Leaf tier.
    Knowledge,
}

impl Tier {
    /// Tiers that become skill nodes, ordered by level.
    pub const TREE_TIERS: [Tier; 4] = [
        Tier::Specialization,
        Tier::Ability,
        Tier::Skill,
        Tier::Knowledge,
    ];

    /// Maps a tree level (depth below the specialization) to its tier.
    pub fn from_level(level: u8) -> Option<Self> {
        Self::TREE_TIERS.get(usize::from(level)).copied()
    }

    /// Returns the tree level, or `None` for `Domain`.
    pub fn level(self) -> Option<u8> {
        match self {
            Self::Domain => None,
            Self::Specialization => Some(0),
            Self::Ability => Some(1),
            Self::Skill => Some(2),
            Self::Knowledge => Some(3),
        }
    }

    /// Tier one step deeper, or `None` below knowledge.
    pub fn child(self) -> Option<Self> {
        match self {
            Self::Domain => Some(Self::Specialization),
            Self::Specialization => Some(Self::Ability),
            Self::Ability => Some(Self::Skill),
            Self::Skill => Some(Self::Knowledge),
            Self::Knowledge => None,
        }
    }

    /// Human-readable tier name for panels.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Domain => "Domain",
            Self::Specialization => "Specialization",
            Self::Ability => "Ability",
            Self::Skill => "Skill",
            Self::Knowledge => "Knowledge",
        }
    }
}

/// Recursive taxonomy record as read from the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    /// Source id, unique within one specialization subtree.
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered children; empty for leaves.
    #[serde(
        default,
        deserialize_with = "deserialize_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<TaxonomyEntry>,
}

impl TaxonomyEntry {
    /// Creates a leaf entry without description.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            children: Vec::new(),
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style children setter.
    pub fn with_children(mut self, children: Vec<TaxonomyEntry>) -> Self {
        self.children = children;
        self
    }

    /// Returns whether this entry has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

fn deserialize_children<'de, D>(deserializer: D) -> Result<Vec<TaxonomyEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TaxonomyEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Specialization picklist item annotated with its owning domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecializationDescriptor {
    /// Owning domain id.
    pub domain_id: String,
    /// Owning domain display name.
    pub domain_name: String,
    /// Specialization subtree (abilities, skills, knowledge).
    pub entry: TaxonomyEntry,
}

impl SpecializationDescriptor {
    pub fn id(&self) -> &str {
        &self.entry.id
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn description(&self) -> Option<&str> {
        self.entry.description.as_deref()
    }
}
