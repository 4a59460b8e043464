//! Progressive disclosure of a built skill tree.
//!
//! # Responsibility
//! - Track which nodes are shown and where, as a pure state transition.
//!
//! # Invariants
//! - Every transition replaces the node positions and the visible set
//!   together; nothing is mutated in place.
//! - Only the ancestor chain and the disclosed children are visible after
//!   a selection.

pub mod reducer;
