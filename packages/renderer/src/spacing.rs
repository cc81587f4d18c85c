//! Structural spacing: the page's spacing variant applies to root
//! components, and any instance may override it with its own `spacing` prop.

use hearth_components::VNode;
use hearth_document::{ComponentInstance, PageSettings, Props, SpacingVariant};
use serde_json::Value;

pub const SPACING_PROP: &str = "spacing";

/// Spacing in effect for `instance` at `depth`
pub fn effective_spacing(
    instance: &ComponentInstance,
    depth: usize,
    settings: &PageSettings,
) -> Option<SpacingVariant> {
    match instance.props.get(SPACING_PROP) {
        Some(value) => parse_spacing(value),
        None if depth == 0 => Some(settings.spacing),
        None => None,
    }
}

pub fn parse_spacing(value: &Value) -> Option<SpacingVariant> {
    serde_json::from_value(value.clone()).ok()
}

/// Stored props with the resolved spacing filled in
pub fn merge_spacing(props: &Props, spacing: Option<SpacingVariant>) -> Props {
    let mut merged = props.clone();
    if let Some(spacing) = spacing {
        if let Ok(value) = serde_json::to_value(spacing) {
            merged.insert(SPACING_PROP.to_string(), value);
        }
    }
    merged
}

/// Apply the spacing gap below a rendered element
pub fn apply_spacing(node: VNode, spacing: Option<SpacingVariant>) -> VNode {
    match (spacing, &node) {
        (Some(spacing), VNode::Element { .. }) => node.with_style("margin-bottom", spacing.gap()),
        _ => node,
    }
}
