//! Header bar view model.

use hearth_editor::EditorState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderView {
    pub title: String,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Steps reachable with undo; history keeps at most 50 snapshots
    pub undo_levels: usize,
    pub redo_levels: usize,
    pub can_save: bool,
    pub is_saving: bool,
    pub has_unsaved_changes: bool,
    pub validation_count: usize,
    /// One line per error, shown on the disabled save button
    pub validation_tooltip: Option<String>,
    pub preview_mode: bool,
}

impl HeaderView {
    pub fn from_state(state: &EditorState) -> Self {
        let title = state
            .page
            .as_ref()
            .map(|page| page.metadata.title.clone())
            .unwrap_or_default();

        let validation_tooltip = state.has_validation_errors().then(|| {
            state
                .validation_errors
                .iter()
                .map(|error| error.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        });

        Self {
            title,
            can_undo: state.can_undo() && !state.preview_mode,
            can_redo: state.can_redo() && !state.preview_mode,
            undo_levels: state.history.undo_levels(),
            redo_levels: state.history.redo_levels(),
            can_save: state.can_save(),
            is_saving: state.is_saving,
            has_unsaved_changes: state.has_unsaved_changes,
            validation_count: state.validation_errors.len(),
            validation_tooltip,
            preview_mode: state.preview_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_document::{create_page, PageDraft, SequentialIds};
    use hearth_editor::ValidationError;

    #[test]
    fn test_header_reflects_errors() {
        let mut ids = SequentialIds::new("p");
        let mut state = EditorState::with_page(create_page(&mut ids, PageDraft::titled("Menu")));
        state.has_unsaved_changes = true;
        assert!(HeaderView::from_state(&state).can_save);

        state.validation_errors = vec![
            ValidationError::new("a", "text", "Text is required"),
            ValidationError::new("b", "src", "Image is required"),
        ];
        let header = HeaderView::from_state(&state);
        assert_eq!(header.title, "Menu");
        assert!(!header.can_save);
        assert_eq!(header.validation_count, 2);
        assert_eq!(header.validation_tooltip.map(|t| t.lines().count()), Some(2));
    }

    #[test]
    fn test_header_reports_history_depth() {
        let mut ids = SequentialIds::new("p");
        let page = create_page(&mut ids, PageDraft::titled("Menu"));
        let mut state = EditorState::with_page(page.clone());
        assert_eq!(HeaderView::from_state(&state).undo_levels, 0);

        state.history.push(page.clone());
        state.history.push(page);
        state.history.undo();
        let header = HeaderView::from_state(&state);
        assert_eq!((header.undo_levels, header.redo_levels), (1, 1));
    }
}
