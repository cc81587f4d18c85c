//! Editor actions: every change to [`EditorState`](crate::EditorState) is
//! described by one of these values and applied by the reducer.

use crate::state::SidebarTab;
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use hearth_document::{PageDocument, PageMetadata, PageSettings, Props};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    // Document
    SetPage {
        page: PageDocument,
    },
    #[serde(rename_all = "camelCase")]
    AddComponent {
        parent_id: Option<String>,
        component_type: String,
        index: usize,
    },
    RemoveComponent {
        id: String,
    },
    UpdateComponentProps {
        id: String,
        props: Props,
    },
    #[serde(rename_all = "camelCase")]
    MoveComponent {
        id: String,
        new_parent_id: Option<String>,
        new_index: usize,
    },
    Copy {
        id: String,
    },
    Cut {
        id: String,
    },
    #[serde(rename_all = "camelCase")]
    Paste {
        parent_id: Option<String>,
        index: usize,
    },
    Duplicate {
        id: String,
    },
    #[serde(rename_all = "camelCase")]
    WrapComponent {
        target_id: String,
        modifier_type: String,
    },
    SetLocked {
        id: String,
        locked: bool,
    },
    UpdatePageMetadata {
        metadata: PageMetadata,
    },
    UpdatePageSettings {
        settings: PageSettings,
    },

    // Renaming
    StartRename {
        id: String,
    },
    CommitRename {
        id: String,
        name: String,
    },
    StopRename,

    // History
    Undo,
    Redo,

    // Validation and view
    SetValidationErrors {
        errors: Vec<ValidationError>,
    },
    TogglePreview,

    // Transient UI
    Select {
        id: Option<String>,
    },
    Hover {
        id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    StartDrag {
        component_type: Option<String>,
    },
    EndDrag,
    SetSaving {
        saving: bool,
    },
    #[serde(rename_all = "camelCase")]
    SaveSucceeded {
        updated_at: DateTime<Utc>,
        version: u64,
    },
    SaveFailed,
    SetSidebarTab {
        tab: SidebarTab,
    },
    #[serde(rename_all = "camelCase")]
    OpenContextMenu {
        x: f64,
        y: f64,
        target_id: Option<String>,
    },
    CloseContextMenu,
}

impl Action {
    /// Stable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetPage { .. } => "SET_PAGE",
            Action::AddComponent { .. } => "ADD_COMPONENT",
            Action::RemoveComponent { .. } => "REMOVE_COMPONENT",
            Action::UpdateComponentProps { .. } => "UPDATE_COMPONENT_PROPS",
            Action::MoveComponent { .. } => "MOVE_COMPONENT",
            Action::Copy { .. } => "COPY",
            Action::Cut { .. } => "CUT",
            Action::Paste { .. } => "PASTE",
            Action::Duplicate { .. } => "DUPLICATE",
            Action::WrapComponent { .. } => "WRAP_COMPONENT",
            Action::SetLocked { .. } => "SET_LOCKED",
            Action::UpdatePageMetadata { .. } => "UPDATE_PAGE_METADATA",
            Action::UpdatePageSettings { .. } => "UPDATE_PAGE_SETTINGS",
            Action::StartRename { .. } => "START_RENAME",
            Action::CommitRename { .. } => "COMMIT_RENAME",
            Action::StopRename => "STOP_RENAME",
            Action::Undo => "UNDO",
            Action::Redo => "REDO",
            Action::SetValidationErrors { .. } => "SET_VALIDATION_ERRORS",
            Action::TogglePreview => "TOGGLE_PREVIEW",
            Action::Select { .. } => "SELECT",
            Action::Hover { .. } => "HOVER",
            Action::StartDrag { .. } => "START_DRAG",
            Action::EndDrag => "END_DRAG",
            Action::SetSaving { .. } => "SET_SAVING",
            Action::SaveSucceeded { .. } => "SAVE_SUCCEEDED",
            Action::SaveFailed => "SAVE_FAILED",
            Action::SetSidebarTab { .. } => "SET_SIDEBAR_TAB",
            Action::OpenContextMenu { .. } => "OPEN_CONTEXT_MENU",
            Action::CloseContextMenu => "CLOSE_CONTEXT_MENU",
        }
    }

    /// Whether applying the action can change the page document
    pub fn changes_document(&self) -> bool {
        matches!(
            self,
            Action::SetPage { .. }
                | Action::AddComponent { .. }
                | Action::RemoveComponent { .. }
                | Action::UpdateComponentProps { .. }
                | Action::MoveComponent { .. }
                | Action::Cut { .. }
                | Action::Paste { .. }
                | Action::Duplicate { .. }
                | Action::WrapComponent { .. }
                | Action::SetLocked { .. }
                | Action::UpdatePageMetadata { .. }
                | Action::UpdatePageSettings { .. }
                | Action::CommitRename { .. }
                | Action::Undo
                | Action::Redo
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_wire_shape() {
        let action = Action::MoveComponent {
            id: "a".to_string(),
            new_parent_id: None,
            new_index: 2,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({ "type": "MOVE_COMPONENT", "id": "a", "newParentId": null, "newIndex": 2 })
        );
        assert_eq!(action.name(), "MOVE_COMPONENT");
    }

    #[test]
    fn test_action_parses_from_json() {
        let action: Action = serde_json::from_value(json!({
            "type": "ADD_COMPONENT",
            "parentId": "s1",
            "componentType": "Title",
            "index": 0
        }))
        .unwrap();
        assert!(matches!(action, Action::AddComponent { ref component_type, .. } if component_type == "Title"));
        assert!(action.changes_document());
        assert!(!Action::Select { id: None }.changes_document());
    }
}
