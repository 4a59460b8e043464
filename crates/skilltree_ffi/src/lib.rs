//! Flutter-facing bindings over `skilltree_core`.

pub mod api;
