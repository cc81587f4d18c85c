//! Layer tree rows for the sidebar.

use hearth_components::ComponentRegistry;
use hearth_document::ComponentInstance;
use hearth_editor::EditorState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRow {
    pub id: String,
    /// Name override, else the registry display name, else the raw type
    pub label: String,
    pub component_type: String,
    pub depth: usize,
    pub selected: bool,
    pub locked: bool,
    pub renaming: bool,
    pub has_children: bool,
}

/// Depth-first rows in sibling `order`
pub fn layer_rows(state: &EditorState, registry: &ComponentRegistry) -> Vec<LayerRow> {
    let mut rows = Vec::new();
    if let Some(page) = &state.page {
        for root in page.ordered_components() {
            push_rows(root, 0, state, registry, &mut rows);
        }
    }
    rows
}

fn push_rows(
    instance: &ComponentInstance,
    depth: usize,
    state: &EditorState,
    registry: &ComponentRegistry,
    rows: &mut Vec<LayerRow>,
) {
    let fallback = registry
        .get(&instance.component_type)
        .map_or(instance.component_type.as_str(), |entry| entry.display_name.as_str());

    rows.push(LayerRow {
        id: instance.id.clone(),
        label: instance.label(fallback).to_string(),
        component_type: instance.component_type.clone(),
        depth,
        selected: state.selected_component_id.as_deref() == Some(instance.id.as_str()),
        locked: instance.is_locked(),
        renaming: state.renaming_component_id.as_deref() == Some(instance.id.as_str()),
        has_children: !instance.children().is_empty(),
    });

    for child in instance.ordered_children() {
        push_rows(child, depth + 1, state, registry, rows);
    }
}
