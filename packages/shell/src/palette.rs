//! Component palette: the registry grouped by category.

use hearth_components::{Category, ComponentRegistry, RegistryEntry};
use hearth_editor::{Action, EditorState};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteItem {
    pub component_type: String,
    pub display_name: String,
    pub icon: String,
    pub description: String,
    /// Modifiers can only be dropped onto an existing component
    pub drag_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteGroup {
    pub category: Category,
    pub label: String,
    pub items: Vec<PaletteItem>,
}

impl From<&RegistryEntry> for PaletteItem {
    fn from(entry: &RegistryEntry) -> Self {
        Self {
            component_type: entry.component_type.clone(),
            display_name: entry.display_name.clone(),
            icon: entry.icon.clone(),
            description: entry.description.clone(),
            drag_only: entry.is_modifier,
        }
    }
}

/// Groups in category order, skipping groups left empty by `filter`.
///
/// The filter matches type, display name and description, case-insensitively.
pub fn palette_groups(registry: &ComponentRegistry, filter: &str) -> Vec<PaletteGroup> {
    let needle = filter.trim().to_lowercase();
    registry
        .get_categories()
        .into_iter()
        .filter_map(|category| {
            let items: Vec<PaletteItem> = registry
                .get_by_category(category)
                .into_iter()
                .filter(|entry| needle.is_empty() || matches(entry, &needle))
                .map(PaletteItem::from)
                .collect();
            (!items.is_empty()).then(|| PaletteGroup {
                category,
                label: category.label().to_string(),
                items,
            })
        })
        .collect()
}

fn matches(entry: &RegistryEntry, needle: &str) -> bool {
    entry.component_type.to_lowercase().contains(needle)
        || entry.display_name.to_lowercase().contains(needle)
        || entry.description.to_lowercase().contains(needle)
}

/// Action for clicking a palette item.
///
/// Appends inside the selected component when it accepts the type, otherwise
/// at the end of the page. Modifiers have no click action.
pub fn click_to_add(
    state: &EditorState,
    registry: &ComponentRegistry,
    component_type: &str,
) -> Option<Action> {
    let entry = registry.get(component_type)?;
    if entry.is_modifier {
        return None;
    }
    let page = state.page.as_ref()?;

    let container = state.selected_component().filter(|selected| {
        registry
            .get(&selected.component_type)
            .map_or(false, |parent| parent.accepts_child(component_type))
    });

    let (parent_id, index) = match container {
        Some(parent) => (Some(parent.id.clone()), parent.children().len()),
        None => (None, page.components.len()),
    };

    Some(Action::AddComponent {
        parent_id,
        component_type: component_type.to_string(),
        index,
    })
}
