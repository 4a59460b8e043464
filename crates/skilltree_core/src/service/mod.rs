//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate loader, builder, reducer, and renderers into one session API.
//! - Keep UI/FFI layers decoupled from tree internals.

pub mod skill_tree_service;
