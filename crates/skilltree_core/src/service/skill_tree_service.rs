//! Skill tree session use-case service.
//!
//! # Responsibility
//! - Own the specialization picklist and the single open tree.
//! - Route clicks and hovers through the disclosure reducer.
//! - Expose scene, SVG, detail panel, legend, and tooltip projections.
//!
//! # Invariants
//! - At most one tree is open; opening another replaces it wholesale.
//! - The open tree is built once and only re-positioned afterwards.
//! - Only visible nodes can be selected or hovered.

use crate::disclosure::reducer::{
    reduce, DisclosureAction, DisclosureError, DisclosureState, Transition,
};
use crate::model::skill_node::{NodeId, SkillNode};
use crate::model::taxonomy::SpecializationDescriptor;
use crate::render::panel::{detail_view, legend, tooltip, DetailView, LegendEntry, Tooltip};
use crate::render::scene::{build_scene, Scene};
use crate::render::svg::render_svg;
use crate::taxonomy::loader::{load_specializations_or_empty, TaxonomySource};
use crate::tree::builder::{build_tree_with, SkillTree};
use crate::tree::config::LayoutConfig;
use crate::tree::status::{StatusPolicy, ThresholdStatusPolicy};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Picklist has no specialization with this id.
    SpecializationNotFound(String),
    /// Operation needs an open tree.
    NoActiveTree,
    /// Node exists but is not currently shown.
    NodeNotVisible(NodeId),
    /// Reducer failure.
    Disclosure(DisclosureError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpecializationNotFound(id) => write!(f, "specialization not found: {id}"),
            Self::NoActiveTree => write!(f, "no specialization is open"),
            Self::NodeNotVisible(id) => write!(f, "skill node is not visible: {id}"),
            Self::Disclosure(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Disclosure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DisclosureError> for SessionError {
    fn from(value: DisclosureError) -> Self {
        Self::Disclosure(value)
    }
}

struct OpenTree {
    descriptor: SpecializationDescriptor,
    tree: SkillTree,
    state: DisclosureState,
}

/// Session facade over the picklist and the open tree.
pub struct SkillTreeService<P: StatusPolicy = ThresholdStatusPolicy> {
    catalog: Vec<SpecializationDescriptor>,
    layout: LayoutConfig,
    policy: P,
    open: Option<OpenTree>,
    hovered: Option<NodeId>,
}

impl SkillTreeService<ThresholdStatusPolicy> {
    /// Creates a service with default layout and threshold policy.
    pub fn new(catalog: Vec<SpecializationDescriptor>) -> Self {
        Self::with_policy(catalog, LayoutConfig::default(), ThresholdStatusPolicy::default())
    }

    /// Loads the picklist from `source`; load failures leave it empty.
    pub fn from_source(source: &TaxonomySource) -> Self {
        Self::new(load_specializations_or_empty(source))
    }
}

impl<P: StatusPolicy> SkillTreeService<P> {
    /// Creates a service with explicit layout and status policy.
    pub fn with_policy(
        catalog: Vec<SpecializationDescriptor>,
        layout: LayoutConfig,
        policy: P,
    ) -> Self {
        Self {
            catalog,
            layout,
            policy,
            open: None,
            hovered: None,
        }
    }

    /// Specialization picklist in load order.
    pub fn specializations(&self) -> &[SpecializationDescriptor] {
        &self.catalog
    }

    /// Builds and opens a specialization's tree in its reset state.
    pub fn open_specialization(&mut self, id: &str) -> Result<&SkillTree, SessionError> {
        let descriptor = self
            .catalog
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or_else(|| SessionError::SpecializationNotFound(id.to_string()))?;

        let tree = build_tree_with(&descriptor.entry, &self.layout, &self.policy);
        let state = DisclosureState::initial(&tree);
        info!(
            "event=session_open module=service status=ok specialization={} domain={} nodes={}",
            descriptor.id(),
            descriptor.domain_id,
            tree.len()
        );
        self.hovered = None;
        let open = self.open.insert(OpenTree {
            descriptor,
            tree,
            state,
        });
        Ok(&open.tree)
    }

    /// Discards the open tree and returns to the picklist.
    pub fn close(&mut self) {
        if let Some(open) = self.open.take() {
            info!(
                "event=session_close module=service status=ok specialization={}",
                open.descriptor.id()
            );
        }
        self.hovered = None;
    }

    pub fn active_specialization(&self) -> Option<&SpecializationDescriptor> {
        self.open.as_ref().map(|open| &open.descriptor)
    }

    pub fn tree(&self) -> Option<&SkillTree> {
        self.open.as_ref().map(|open| &open.tree)
    }

    pub fn disclosure(&self) -> Option<&DisclosureState> {
        self.open.as_ref().map(|open| &open.state)
    }

    /// Currently selected node, if any.
    pub fn selected_node(&self) -> Option<&SkillNode> {
        let open = self.open.as_ref()?;
        open.tree.node(open.state.selected()?)
    }

    /// Handles a click on a visible node and returns it.
    pub fn select_node(&mut self, id: &str) -> Result<&SkillNode, SessionError> {
        self.apply(DisclosureAction::Select(id.to_string()), Some(id))?;
        let open = self.open.as_ref().ok_or(SessionError::NoActiveTree)?;
        open.tree
            .node(id)
            .ok_or_else(|| SessionError::Disclosure(DisclosureError::NodeNotFound(id.to_string())))
    }

    /// Returns the open tree to its root-only state.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.hovered = None;
        self.apply(DisclosureAction::Reset, None)
    }

    /// Sets or clears the hovered node.
    pub fn hover(&mut self, id: Option<&str>) -> Result<(), SessionError> {
        let open = self.open.as_ref().ok_or(SessionError::NoActiveTree)?;
        match id {
            None => self.hovered = None,
            Some(id) => {
                ensure_visible(open, id)?;
                self.hovered = Some(id.to_string());
            }
        }
        Ok(())
    }

    /// Visible scene of the open tree.
    pub fn scene(&self) -> Result<Scene, SessionError> {
        let open = self.open.as_ref().ok_or(SessionError::NoActiveTree)?;
        Ok(build_scene(&open.tree, &open.state, self.hovered.as_deref()))
    }

    /// SVG document of the visible scene.
    pub fn render_svg(&self) -> Result<String, SessionError> {
        self.scene().map(|scene| render_svg(&scene))
    }

    /// Detail view for the current selection; empty when nothing is open.
    pub fn detail_panel(&self) -> DetailView {
        detail_view(self.selected_node())
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        let open = self.open.as_ref()?;
        tooltip(&open.tree, &open.state, self.hovered.as_deref()?)
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        legend()
    }

    fn apply(
        &mut self,
        action: DisclosureAction,
        must_be_visible: Option<&str>,
    ) -> Result<(), SessionError> {
        let open = self.open.as_mut().ok_or(SessionError::NoActiveTree)?;
        if let Some(id) = must_be_visible {
            ensure_visible(open, id)?;
        }
        let Transition { tree, state } = reduce(&open.tree, &open.state, &action)?;
        open.tree = tree;
        open.state = state;
        if let Some(hovered) = self.hovered.as_deref() {
            if !open.state.is_visible(hovered) {
                self.hovered = None;
            }
        }
        Ok(())
    }
}

fn ensure_visible(open: &OpenTree, id: &str) -> Result<(), SessionError> {
    if !open.tree.contains(id) {
        return Err(SessionError::Disclosure(DisclosureError::NodeNotFound(
            id.to_string(),
        )));
    }
    if !open.state.is_visible(id) {
        return Err(SessionError::NodeNotVisible(id.to_string()));
    }
    Ok(())
}
