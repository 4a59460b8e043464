//! Domain model for taxonomy input and skill tree output.
//!
//! # Responsibility
//! - Define the validated taxonomy record consumed at load time.
//! - Define the positioned skill node produced by the tree builder.
//!
//! # Invariants
//! - Taxonomy depth is implicit in nesting; `Tier` makes it explicit.
//! - A skill node's identity fields never change after build.

pub mod skill_node;
pub mod taxonomy;
