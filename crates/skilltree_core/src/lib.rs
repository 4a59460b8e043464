//! Core domain logic for the skill tree.
//! Taxonomy loading, tree building, disclosure, and presentation live here;
//! UI shells only call into this crate.

pub mod disclosure;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod taxonomy;
pub mod tree;

pub use disclosure::reducer::{
    ancestor_chain, reduce, DisclosureAction, DisclosureError, DisclosureState, Transition,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::skill_node::{NodeId, NodeStatus, SkillNode};
pub use model::taxonomy::{SpecializationDescriptor, TaxonomyEntry, Tier};
pub use render::panel::{
    detail_view, legend, status_message, tooltip, DetailPanel, DetailView, LegendEntry,
    PanelAction, StatusIcon, Tooltip, EMPTY_SELECTION_HINT,
};
pub use render::scene::{
    build_scene, edge_style, status_palette, EdgeGlyph, EdgeStyle, NodeGlyph, Scene,
    StatusPalette,
};
pub use render::svg::render_svg;
pub use service::skill_tree_service::{SessionError, SkillTreeService};
pub use taxonomy::loader::{
    builtin_taxonomy, flatten_specializations, load_specializations,
    load_specializations_or_empty, parse_taxonomy, parse_taxonomy_reader, TaxonomyError,
    TaxonomyResult, TaxonomySource,
};
pub use taxonomy::validate::TaxonomyValidationError;
pub use tree::builder::{build_tree, build_tree_with, truncate_label, SkillTree};
pub use tree::config::{spread_x, LabelLimits, LayoutConfig, RowLayout};
pub use tree::status::{available_count, compute_status, StatusPolicy, ThresholdStatusPolicy};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
