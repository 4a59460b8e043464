//! Taxonomy source reading and specialization flattening.
//!
//! # Responsibility
//! - Parse the nested JSON taxonomy from a file, string, or the bundled copy.
//! - Produce the ordered specialization picklist.
//!
//! # Invariants
//! - Picklist order follows domain order, then specialization order.
//! - `load_specializations_or_empty` never returns an error.

use crate::model::taxonomy::{SpecializationDescriptor, TaxonomyEntry};
use crate::taxonomy::validate::{validate_domains, TaxonomyValidationError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

const BUILTIN_TAXONOMY_JSON: &str = include_str!("../../data/builtin_taxonomy.json");

/// Result type for taxonomy loading.
pub type TaxonomyResult<T> = Result<T, TaxonomyError>;

/// Errors from reading, parsing, or validating a taxonomy.
#[derive(Debug)]
pub enum TaxonomyError {
    /// Source file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// Source is not a valid taxonomy JSON document.
    Parse(serde_json::Error),
    /// Source parsed but violates structural rules.
    Invalid(TaxonomyValidationError),
}

impl Display for TaxonomyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read taxonomy `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "malformed taxonomy: {err}"),
            Self::Invalid(err) => write!(f, "invalid taxonomy: {err}"),
        }
    }
}

impl Error for TaxonomyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for TaxonomyError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<TaxonomyValidationError> for TaxonomyError {
    fn from(value: TaxonomyValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Where the taxonomy is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomySource {
    /// Sample taxonomy compiled into the crate.
    Builtin,
    /// JSON file on disk.
    File(PathBuf),
    /// JSON document held in memory.
    Inline(String),
}

impl TaxonomySource {
    fn mode(&self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::File(_) => "file",
            Self::Inline(_) => "inline",
        }
    }
}

/// Returns the bundled sample taxonomy document.
pub fn builtin_taxonomy() -> &'static str {
    BUILTIN_TAXONOMY_JSON
}

/// Parses and validates a domain list from JSON text.
pub fn parse_taxonomy(json: &str) -> TaxonomyResult<Vec<TaxonomyEntry>> {
    let mut domains: Vec<TaxonomyEntry> = serde_json::from_str(json)?;
    validate_domains(&mut domains)?;
    Ok(domains)
}

/// Parses and validates a domain list from a reader.
pub fn parse_taxonomy_reader(reader: impl Read) -> TaxonomyResult<Vec<TaxonomyEntry>> {
    let mut domains: Vec<TaxonomyEntry> = serde_json::from_reader(reader)?;
    validate_domains(&mut domains)?;
    Ok(domains)
}

/// Flattens domains into the specialization picklist.
pub fn flatten_specializations(domains: Vec<TaxonomyEntry>) -> Vec<SpecializationDescriptor> {
    domains
        .into_iter()
        .flat_map(|domain| {
            let TaxonomyEntry {
                id: domain_id,
                name: domain_name,
                children,
                ..
            } = domain;
            children
                .into_iter()
                .map(move |entry| SpecializationDescriptor {
                    domain_id: domain_id.clone(),
                    domain_name: domain_name.clone(),
                    entry,
                })
        })
        .collect()
}

/// Loads the specialization picklist from a source.
///
/// # Errors
/// - `Io` when the file cannot be opened.
/// - `Parse` when the document is not a domain array.
/// - `Invalid` when validation fails.
pub fn load_specializations(
    source: &TaxonomySource,
) -> TaxonomyResult<Vec<SpecializationDescriptor>> {
    let domains = match source {
        TaxonomySource::Builtin => parse_taxonomy(BUILTIN_TAXONOMY_JSON)?,
        TaxonomySource::Inline(json) => parse_taxonomy(json)?,
        TaxonomySource::File(path) => read_taxonomy_file(path)?,
    };
    Ok(flatten_specializations(domains))
}

/// Loads the picklist, logging failures and returning an empty list instead.
pub fn load_specializations_or_empty(source: &TaxonomySource) -> Vec<SpecializationDescriptor> {
    let started_at = Instant::now();
    match load_specializations(source) {
        Ok(items) => {
            info!(
                "event=taxonomy_load module=taxonomy status=ok mode={} specializations={} duration_ms={}",
                source.mode(),
                items.len(),
                started_at.elapsed().as_millis()
            );
            items
        }
        Err(err) => {
            error!(
                "event=taxonomy_load module=taxonomy status=error mode={} duration_ms={} error={}",
                source.mode(),
                started_at.elapsed().as_millis(),
                err
            );
            Vec::new()
        }
    }
}

fn read_taxonomy_file(path: &Path) -> TaxonomyResult<Vec<TaxonomyEntry>> {
    let file = std::fs::File::open(path).map_err(|source| TaxonomyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_taxonomy_reader(std::io::BufReader::new(file))
}
