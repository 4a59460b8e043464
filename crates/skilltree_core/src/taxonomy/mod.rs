//! Taxonomy loading and validation.
//!
//! # Responsibility
//! - Read the nested domain → specialization taxonomy once at startup.
//! - Flatten it into a specialization picklist tagged with domain names.
//!
//! # Invariants
//! - Only validated taxonomies reach the tree builder.
//! - Fail-soft loading never panics; it logs and yields an empty list.

pub mod loader;
pub mod validate;
