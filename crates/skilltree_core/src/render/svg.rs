//! SVG serialization of a scene in the normalized 0..=100 plane.

use crate::render::scene::{status_palette, EdgeGlyph, NodeGlyph, Scene};
use quick_xml::escape::escape;
use std::borrow::Cow;

const NODE_RADIUS: f64 = 3.0;
const SELECTED_RING_RADIUS: f64 = 4.0;
const SELECTED_RING_STROKE: &str = "#8b5cf6";
const LABEL_OFFSET_Y: f64 = 5.5;
const LABEL_FONT_SIZE: &str = "2.5px";
const LABEL_FILL: &str = "#3f3f46";

/// Renders a standalone SVG document for `scene`.
///
/// Gradient ids are derived from node ids, so each node gets its own
/// `<linearGradient>`.
pub fn render_svg(scene: &Scene) -> String {
    let mut out = String::from(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\" preserveAspectRatio=\"xMidYMid meet\">\n",
    );

    out.push_str("  <defs>\n");
    for node in &scene.nodes {
        push_gradient(&mut out, node);
    }
    out.push_str("  </defs>\n");

    out.push_str("  <g class=\"edges\">\n");
    for edge in &scene.edges {
        push_edge(&mut out, edge);
    }
    out.push_str("  </g>\n");

    out.push_str("  <g class=\"nodes\">\n");
    for node in &scene.nodes {
        push_node(&mut out, node);
    }
    out.push_str("  </g>\n</svg>\n");
    out
}

fn push_gradient(out: &mut String, node: &NodeGlyph) {
    let palette = status_palette(node.status);
    out.push_str(&format!(
        "    <linearGradient id=\"{}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"100%\">\
<stop offset=\"0%\" stop-color=\"{}\"/><stop offset=\"100%\" stop-color=\"{}\"/></linearGradient>\n",
        gradient_id(&node.id),
        palette.from,
        palette.to
    ));
}

fn push_edge(out: &mut String, edge: &EdgeGlyph) {
    let style = edge.style;
    out.push_str(&format!(
        "    <line data-source=\"{}\" data-target=\"{}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"{}\" opacity=\"{}\"/>\n",
        escape_xml(&edge.source),
        escape_xml(&edge.target),
        edge.from.0,
        edge.from.1,
        edge.to.0,
        edge.to.1,
        style.stroke(),
        style.stroke_width(),
        style.dash_array(),
        style.opacity()
    ));
}

fn push_node(out: &mut String, node: &NodeGlyph) {
    out.push_str(&format!(
        "    <g data-node-id=\"{}\" data-status=\"{}\" transform=\"translate({}, {})\">\n",
        escape_xml(&node.id),
        node.status.as_str(),
        node.x,
        node.y
    ));
    if node.selected {
        out.push_str(&format!(
            "      <circle r=\"{SELECTED_RING_RADIUS}\" fill=\"none\" stroke=\"{SELECTED_RING_STROKE}\" stroke-width=\"0.4\" opacity=\"0.5\"/>\n"
        ));
    }
    out.push_str(&format!(
        "      <circle r=\"{NODE_RADIUS}\" fill=\"url(#{})\"/>\n",
        gradient_id(&node.id)
    ));
    out.push_str(&format!(
        "      <title>{}</title>\n",
        escape_xml(&node.full_name)
    ));
    out.push_str(&format!(
        "      <text y=\"{LABEL_OFFSET_Y}\" text-anchor=\"middle\" style=\"font-size: {LABEL_FONT_SIZE}; fill: {LABEL_FILL}\">{}</text>\n",
        escape_xml(&node.label)
    ));
    out.push_str("    </g>\n");
}

/// Gradient element id for a node. Characters outside `[A-Za-z0-9_-]` are
/// replaced so the id stays a valid `url(#...)` reference.
fn gradient_id(node_id: &str) -> String {
    let sanitized: String = node_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}-gradient")
}

fn escape_xml(value: &str) -> Cow<'_, str> {
    escape(value)
}
