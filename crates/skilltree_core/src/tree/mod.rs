//! Skill tree construction.
//!
//! # Responsibility
//! - Convert one specialization subtree into positioned skill nodes.
//! - Keep geometry constants and status derivation behind explicit seams.
//!
//! # Invariants
//! - A tree is built once per specialization selection; later interactions
//!   only move nodes and change visibility.

pub mod builder;
pub mod config;
pub mod status;
