//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the skill tree session to Dart via FRB as sync functions.
//! - Flatten core types into plain envelopes with `ok` + `message`.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One process-wide session; every call locks it for its whole duration.
//! - Return values are UTF-8 strings with stable meaning.

use skilltree_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DetailView, SkillTreeService, SpecializationDescriptor, TaxonomySource,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const TAXONOMY_PATH_ENV: &str = "SKILLTREE_TAXONOMY_PATH";
static SESSION: OnceLock<Mutex<SkillTreeService>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str(), false) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Picklist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecializationItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub domain_id: String,
    pub domain_name: String,
}

/// Snapshot of the open tree after a command.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeViewResponse {
    /// Whether the command succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Open specialization, if any.
    pub specialization_id: Option<String>,
    pub selected_id: Option<String>,
    /// Visible node ids in build order.
    pub visible_ids: Vec<String>,
    /// SVG document of the visible scene; empty when nothing is open.
    pub svg: String,
}

impl TreeViewResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            specialization_id: None,
            selected_id: None,
            visible_ids: Vec::new(),
            svg: String::new(),
        }
    }
}

/// Flattened detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanelItem {
    /// `false` when nothing is selected; only `hint` is set then.
    pub has_selection: bool,
    pub hint: String,
    pub node_id: String,
    pub title: String,
    pub tier: String,
    pub description: Option<String>,
    /// `unlocked|available|locked`.
    pub status: String,
    pub status_message: String,
    /// `check-circle|circle|lock`.
    pub icon: String,
    pub action_label: Option<String>,
}

/// Hover result.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipResponse {
    pub ok: bool,
    pub message: String,
    pub tooltip: Option<TooltipItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipItem {
    pub node_id: String,
    pub title: String,
    pub status_label: String,
    pub x: f64,
    pub y: f64,
}

/// Lists specializations from the session picklist.
///
/// # FFI contract
/// - First call loads the taxonomy from `SKILLTREE_TAXONOMY_PATH`, or the
///   bundled taxonomy when unset; load failures yield an empty list.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_specializations() -> Vec<SpecializationItem> {
    match lock_session() {
        Ok(service) => service
            .specializations()
            .iter()
            .map(to_specialization_item)
            .collect(),
        Err(message) => {
            log::error!("event=ffi_call module=ffi status=error call=list_specializations error={message}");
            Vec::new()
        }
    }
}

/// Opens a specialization in its root-only state.
#[flutter_rust_bridge::frb(sync)]
pub fn open_specialization(specialization_id: String) -> TreeViewResponse {
    with_session(|service| {
        service
            .open_specialization(specialization_id.trim())
            .map(|_| ())
            .map_err(|err| format!("open_specialization failed: {err}"))?;
        Ok(tree_view(service, "Specialization opened."))
    })
}

/// Returns to the picklist.
#[flutter_rust_bridge::frb(sync)]
pub fn close_specialization() -> TreeViewResponse {
    with_session(|service| {
        service.close();
        Ok(tree_view(service, "Specialization closed."))
    })
}

/// Handles a click on a visible node.
#[flutter_rust_bridge::frb(sync)]
pub fn select_node(node_id: String) -> TreeViewResponse {
    with_session(|service| {
        service
            .select_node(node_id.trim())
            .map(|_| ())
            .map_err(|err| format!("select_node failed: {err}"))?;
        Ok(tree_view(service, "Node selected."))
    })
}

/// Sets (`Some`) or clears (`None`) the hovered node.
#[flutter_rust_bridge::frb(sync)]
pub fn hover_node(node_id: Option<String>) -> TooltipResponse {
    let mut service = match lock_session() {
        Ok(service) => service,
        Err(message) => return tooltip_failure(message),
    };
    hover_with(&mut service, node_id.as_deref())
}

/// Renders the current scene without changing state.
#[flutter_rust_bridge::frb(sync)]
pub fn render_tree_svg() -> TreeViewResponse {
    with_session(|service| Ok(tree_view(service, "Rendered.")))
}

/// Detail panel for the current selection.
#[flutter_rust_bridge::frb(sync)]
pub fn detail_panel() -> DetailPanelItem {
    match lock_session() {
        Ok(service) => to_detail_item(service.detail_panel()),
        Err(message) => {
            log::error!("event=ffi_call module=ffi status=error call=detail_panel error={message}");
            to_detail_item(DetailView::Empty {
                hint: skilltree_core::EMPTY_SELECTION_HINT,
            })
        }
    }
}

fn taxonomy_source() -> TaxonomySource {
    match std::env::var(TAXONOMY_PATH_ENV) {
        Ok(raw) if !raw.trim().is_empty() => TaxonomySource::File(PathBuf::from(raw.trim())),
        _ => TaxonomySource::Builtin,
    }
}

fn lock_session() -> Result<MutexGuard<'static, SkillTreeService>, String> {
    SESSION
        .get_or_init(|| Mutex::new(SkillTreeService::from_source(&taxonomy_source())))
        .lock()
        .map_err(|_| "skill tree session lock poisoned".to_string())
}

fn with_session(
    f: impl FnOnce(&mut SkillTreeService) -> Result<TreeViewResponse, String>,
) -> TreeViewResponse {
    let mut service = match lock_session() {
        Ok(service) => service,
        Err(message) => return TreeViewResponse::failure(message),
    };
    match f(&mut service) {
        Ok(response) => response,
        Err(message) => {
            log::warn!("event=ffi_call module=ffi status=error error={message}");
            let mut response = tree_view(&service, message);
            response.ok = false;
            response
        }
    }
}

fn hover_with(service: &mut SkillTreeService, node_id: Option<&str>) -> TooltipResponse {
    match service.hover(node_id.map(str::trim)) {
        Ok(()) => TooltipResponse {
            ok: true,
            message: if node_id.is_some() {
                "Hovering.".to_string()
            } else {
                "Hover cleared.".to_string()
            },
            tooltip: service.tooltip().map(|tooltip| TooltipItem {
                node_id: tooltip.node_id,
                title: tooltip.title,
                status_label: tooltip.status_label.to_string(),
                x: tooltip.x,
                y: tooltip.y,
            }),
        },
        Err(err) => tooltip_failure(format!("hover_node failed: {err}")),
    }
}

fn tooltip_failure(message: impl Into<String>) -> TooltipResponse {
    TooltipResponse {
        ok: false,
        message: message.into(),
        tooltip: None,
    }
}

fn tree_view(service: &SkillTreeService, message: impl Into<String>) -> TreeViewResponse {
    let specialization_id = service
        .active_specialization()
        .map(|descriptor| descriptor.id().to_string());
    let selected_id = service
        .disclosure()
        .and_then(|state| state.selected())
        .map(str::to_string);
    let visible_ids = match (service.tree(), service.disclosure()) {
        (Some(tree), Some(state)) => tree
            .nodes()
            .iter()
            .filter(|node| state.is_visible(&node.id))
            .map(|node| node.id.clone())
            .collect(),
        _ => Vec::new(),
    };
    TreeViewResponse {
        ok: true,
        message: message.into(),
        specialization_id,
        selected_id,
        visible_ids,
        svg: service.render_svg().unwrap_or_default(),
    }
}

fn to_specialization_item(descriptor: &SpecializationDescriptor) -> SpecializationItem {
    SpecializationItem {
        id: descriptor.id().to_string(),
        name: descriptor.name().to_string(),
        description: descriptor.description().map(str::to_string),
        domain_id: descriptor.domain_id.clone(),
        domain_name: descriptor.domain_name.clone(),
    }
}

fn to_detail_item(view: DetailView) -> DetailPanelItem {
    match view {
        DetailView::Empty { hint } => DetailPanelItem {
            has_selection: false,
            hint: hint.to_string(),
            node_id: String::new(),
            title: String::new(),
            tier: String::new(),
            description: None,
            status: String::new(),
            status_message: String::new(),
            icon: String::new(),
            action_label: None,
        },
        DetailView::Node(panel) => DetailPanelItem {
            has_selection: true,
            hint: String::new(),
            node_id: panel.node_id,
            title: panel.title,
            tier: panel.tier.to_string(),
            description: panel.description,
            status: panel.status.as_str().to_string(),
            status_message: panel.status_message.to_string(),
            icon: panel.icon.as_str().to_string(),
            action_label: panel.action.map(|action| action.label().to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, hover_with, init_logging, open_specialization, ping, to_detail_item,
        to_specialization_item, tree_view,
    };
    use skilltree_core::{SkillTreeService, TaxonomySource};

    fn local_service() -> SkillTreeService {
        SkillTreeService::from_source(&TaxonomySource::Builtin)
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn picklist_comes_from_bundled_taxonomy() {
        let service = local_service();
        let items: Vec<_> = service
            .specializations()
            .iter()
            .map(to_specialization_item)
            .collect();
        assert!(items.iter().any(|item| item.id == "data-science"));
        assert!(items.iter().all(|item| !item.domain_name.is_empty()));
    }

    #[test]
    fn unknown_specialization_returns_failure_envelope() {
        let response = open_specialization("no-such-specialization".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("no-such-specialization"));
    }

    #[test]
    fn tree_view_tracks_selection_and_visibility() {
        let mut service = local_service();
        let closed = tree_view(&service, "idle");
        assert!(closed.visible_ids.is_empty());
        assert!(closed.svg.is_empty());

        service.open_specialization("data-science").expect("open");
        service.select_node("data-science").expect("select root");
        service.select_node("data-science").expect("expand root");

        let view = tree_view(&service, "ok");
        assert_eq!(view.specialization_id.as_deref(), Some("data-science"));
        assert_eq!(view.selected_id.as_deref(), Some("data-science"));
        assert_eq!(view.visible_ids[0], "data-science");
        assert!(view.visible_ids.len() > 1);
        assert!(view.svg.contains("data-node-id=\"data-science\""));
    }

    #[test]
    fn hover_rejects_hidden_nodes() {
        let mut service = local_service();
        service.open_specialization("data-science").expect("open");

        let hidden = hover_with(&mut service, Some("ds-programming"));
        assert!(!hidden.ok);
        assert!(hidden.tooltip.is_none());

        let root = hover_with(&mut service, Some("data-science"));
        assert!(root.ok, "{}", root.message);
        let tooltip = root.tooltip.expect("root tooltip");
        assert_eq!(tooltip.status_label, "Unlocked");
        assert_eq!((tooltip.x, tooltip.y), (50.0, 85.0));
    }

    #[test]
    fn detail_item_flattens_selected_panel() {
        let mut service = local_service();
        assert!(!to_detail_item(service.detail_panel()).has_selection);

        service.open_specialization("data-science").expect("open");
        service.select_node("data-science").expect("select root");
        let item = to_detail_item(service.detail_panel());
        assert!(item.has_selection);
        assert_eq!(item.icon, "check-circle");
        assert_eq!(item.status, "unlocked");
        assert_eq!(item.action_label.as_deref(), Some("Review Content"));
    }
}
