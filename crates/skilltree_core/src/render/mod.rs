//! Presentation projections of a disclosed skill tree.
//!
//! # Responsibility
//! - Project visible nodes and edges into a renderer-neutral scene.
//! - Serialize scenes as SVG and derive detail panel, legend, and tooltip.
//!
//! # Invariants
//! - Hidden nodes never appear in a scene, and neither do edges touching them.
//! - Status → color and edge style mappings are defined once here.

pub mod panel;
pub mod scene;
pub mod svg;
