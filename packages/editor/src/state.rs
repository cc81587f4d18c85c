use crate::history::History;
use crate::validation::ValidationError;
use hearth_document::{ComponentInstance, PageDocument};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardMode {
    Copy,
    Cut,
}

/// Deep copy of a subtree held for paste
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub instance: ComponentInstance,
    pub mode: ClipboardMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarTab {
    #[default]
    Components,
    Layers,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuState {
    pub open: bool,
    pub x: f64,
    pub y: f64,
    pub target_id: Option<String>,
}

/// Everything the editor knows about the page being edited.
///
/// Values are replaced wholesale by the reducer; nothing here is mutated in
/// place by callers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub page: Option<PageDocument>,
    pub selected_component_id: Option<String>,
    pub hovered_component_id: Option<String>,
    pub is_dragging: bool,
    pub dragged_component_type: Option<String>,
    pub history: History,
    pub clipboard: Option<ClipboardEntry>,
    pub is_saving: bool,
    pub has_unsaved_changes: bool,
    pub preview_mode: bool,
    pub validation_errors: Vec<ValidationError>,
    pub renaming_component_id: Option<String>,
    pub sidebar_tab: SidebarTab,
    pub context_menu: ContextMenuState,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with `page` loaded as the first history entry
    pub fn with_page(page: PageDocument) -> Self {
        let mut history = History::new();
        history.reset(page.clone());
        Self {
            page: Some(page),
            history,
            ..Self::default()
        }
    }

    pub fn selected_component(&self) -> Option<&ComponentInstance> {
        let id = self.selected_component_id.as_deref()?;
        self.page.as_ref()?.find(id)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn has_validation_errors(&self) -> bool {
        !self.validation_errors.is_empty()
    }

    /// Saving requires a page, pending changes, no save in flight and a valid document
    pub fn can_save(&self) -> bool {
        self.page.is_some()
            && self.has_unsaved_changes
            && !self.is_saving
            && self.validation_errors.is_empty()
    }

    /// Validation errors reported against one component
    pub fn errors_for(&self, component_id: &str) -> Vec<&ValidationError> {
        self.validation_errors
            .iter()
            .filter(|error| error.component_id == component_id)
            .collect()
    }
}
