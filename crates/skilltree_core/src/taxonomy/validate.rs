//! Load-time taxonomy validation and text normalization.

use crate::model::taxonomy::{TaxonomyEntry, Tier};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Structural problems found in a parsed taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyValidationError {
    /// Entry id is blank after trim.
    EmptyId { tier: Tier, parent_id: Option<String> },
    /// Entry name is blank after trim.
    EmptyName { tier: Tier, id: String },
    /// A knowledge entry declares children.
    TooDeep { id: String },
    /// Id repeats inside one specialization subtree, or across specializations.
    DuplicateId { id: String },
}

impl Display for TaxonomyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId {
                tier,
                parent_id: Some(parent_id),
            } => write!(
                f,
                "{} under `{parent_id}` has an empty id",
                tier.display_name().to_ascii_lowercase()
            ),
            Self::EmptyId {
                tier,
                parent_id: None,
            } => write!(
                f,
                "top-level {} has an empty id",
                tier.display_name().to_ascii_lowercase()
            ),
            Self::EmptyName { tier, id } => write!(
                f,
                "{} `{id}` has an empty name",
                tier.display_name().to_ascii_lowercase()
            ),
            Self::TooDeep { id } => {
                write!(f, "knowledge entry `{id}` must not declare children")
            }
            Self::DuplicateId { id } => write!(f, "duplicate taxonomy id `{id}`"),
        }
    }
}

impl Error for TaxonomyValidationError {}

/// Validates and normalizes a list of domains in place.
///
/// # Invariants
/// - Ids are trimmed; names and descriptions have whitespace runs collapsed.
/// - Empty descriptions become `None`.
/// - Specialization ids are unique across domains; every id is unique
///   inside its specialization subtree.
pub fn validate_domains(domains: &mut [TaxonomyEntry]) -> Result<(), TaxonomyValidationError> {
    let mut specialization_ids = HashSet::new();
    for domain in domains.iter_mut() {
        normalize_entry(domain, Tier::Domain, None)?;
        let domain_id = domain.id.clone();
        for specialization in domain.children.iter_mut() {
            normalize_entry(specialization, Tier::Specialization, Some(&domain_id))?;
            if !specialization_ids.insert(specialization.id.clone()) {
                return Err(TaxonomyValidationError::DuplicateId {
                    id: specialization.id.clone(),
                });
            }
            let mut subtree_ids = HashSet::from([specialization.id.clone()]);
            validate_subtree(specialization, Tier::Specialization, &mut subtree_ids)?;
        }
    }
    Ok(())
}

fn validate_subtree(
    entry: &mut TaxonomyEntry,
    tier: Tier,
    seen: &mut HashSet<String>,
) -> Result<(), TaxonomyValidationError> {
    let Some(child_tier) = tier.child() else {
        if entry.is_leaf() {
            return Ok(());
        }
        return Err(TaxonomyValidationError::TooDeep {
            id: entry.id.clone(),
        });
    };

    let parent_id = entry.id.clone();
    for child in entry.children.iter_mut() {
        normalize_entry(child, child_tier, Some(&parent_id))?;
        if !seen.insert(child.id.clone()) {
            return Err(TaxonomyValidationError::DuplicateId {
                id: child.id.clone(),
            });
        }
        validate_subtree(child, child_tier, seen)?;
    }
    Ok(())
}

fn normalize_entry(
    entry: &mut TaxonomyEntry,
    tier: Tier,
    parent_id: Option<&str>,
) -> Result<(), TaxonomyValidationError> {
    let id = entry.id.trim();
    if id.is_empty() {
        return Err(TaxonomyValidationError::EmptyId {
            tier,
            parent_id: parent_id.map(str::to_string),
        });
    }
    entry.id = id.to_string();

    let name = collapse_whitespace(&entry.name);
    if name.is_empty() {
        return Err(TaxonomyValidationError::EmptyName {
            tier,
            id: entry.id.clone(),
        });
    }
    entry.name = name;

    entry.description = entry
        .description
        .as_deref()
        .map(collapse_whitespace)
        .filter(|value| !value.is_empty());
    Ok(())
}

/// Collapses whitespace runs into single spaces and trims both ends.
pub fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::{collapse_whitespace, validate_domains, TaxonomyValidationError};
    use crate::model::taxonomy::{TaxonomyEntry, Tier};

    fn domain(children: Vec<TaxonomyEntry>) -> TaxonomyEntry {
        TaxonomyEntry::new("tech", "Technology").with_children(children)
    }

    #[test]
    fn collapse_whitespace_normalizes_runs_and_edges() {
        assert_eq!(collapse_whitespace("  Data \n  Science\t"), "Data Science");
    }

    #[test]
    fn rejects_blank_specialization_name() {
        let mut domains = vec![domain(vec![TaxonomyEntry::new("ds", "   ")])];
        let err = validate_domains(&mut domains).expect_err("blank name must be rejected");
        assert_eq!(
            err,
            TaxonomyValidationError::EmptyName {
                tier: Tier::Specialization,
                id: "ds".to_string(),
            }
        );
    }

    #[test]
    fn rejects_children_below_knowledge() {
        let too_deep = TaxonomyEntry::new("ds", "Data Science").with_children(vec![
            TaxonomyEntry::new("a1", "Ability").with_children(vec![TaxonomyEntry::new(
                "s1", "Skill",
            )
            .with_children(vec![TaxonomyEntry::new("k1", "Knowledge")
                .with_children(vec![TaxonomyEntry::new("x1", "Extra")])])]),
        ]);
        let mut domains = vec![domain(vec![too_deep])];
        let err = validate_domains(&mut domains).expect_err("fifth tier must be rejected");
        assert_eq!(
            err,
            TaxonomyValidationError::TooDeep {
                id: "k1".to_string()
            }
        );
    }

    #[test]
    fn rejects_duplicate_ids_inside_one_specialization() {
        let spec = TaxonomyEntry::new("ds", "Data Science").with_children(vec![
            TaxonomyEntry::new("dup", "First"),
            TaxonomyEntry::new("dup", "Second"),
        ]);
        let mut domains = vec![domain(vec![spec])];
        let err = validate_domains(&mut domains).expect_err("duplicate id must be rejected");
        assert_eq!(
            err,
            TaxonomyValidationError::DuplicateId {
                id: "dup".to_string()
            }
        );
    }

    #[test]
    fn allows_same_child_id_in_different_specializations() {
        let first = TaxonomyEntry::new("ds", "Data Science")
            .with_children(vec![TaxonomyEntry::new("python", "Python")]);
        let second = TaxonomyEntry::new("web", "Web Development")
            .with_children(vec![TaxonomyEntry::new("python", "Python")]);
        let mut domains = vec![domain(vec![first, second])];
        assert!(validate_domains(&mut domains).is_ok());
    }

    #[test]
    fn blank_description_becomes_none() {
        let spec = TaxonomyEntry::new(" ds ", "Data  Science").with_description("   ");
        let mut domains = vec![domain(vec![spec])];
        validate_domains(&mut domains).expect("valid taxonomy");
        let spec = &domains[0].children[0];
        assert_eq!(spec.id, "ds");
        assert_eq!(spec.name, "Data Science");
        assert_eq!(spec.description, None);
    }
}
