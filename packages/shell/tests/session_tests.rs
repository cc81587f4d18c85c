use hearth_components::bakery_registry;
use hearth_document::SequentialIds;
use hearth_editor::{DragSource, Reducer};
use hearth_persistence::{BundledPages, MemoryStore, NullStore, OverrideStore, PageService};
use hearth_shell::{
    CanvasEvent, EditorSession, ExitDecision, KeyChord, KeyOutcome, LoadStatus, MenuCommand,
    ShellError, Viewport, ROOT_ZONE_CLASS,
};
use std::sync::Arc;

fn session_with<S: OverrideStore>(store: S) -> EditorSession<S> {
    let registry = Arc::new(bakery_registry());
    let service = Arc::new(PageService::new(BundledPages::builtin(), store));
    EditorSession::with_reducer(Reducer::with_ids(registry, SequentialIds::new("new")), service)
}

async fn opened() -> EditorSession<MemoryStore> {
    let mut session = session_with(MemoryStore::new());
    session.open("home").await.unwrap();
    session
}

fn key(text: &str) -> KeyChord {
    KeyChord::parse(text).unwrap()
}

fn count(session: &EditorSession<impl OverrideStore>) -> usize {
    session.state().page.as_ref().map_or(0, |p| p.component_count())
}

fn root_ids(session: &EditorSession<impl OverrideStore>) -> Vec<String> {
    session
        .state()
        .page
        .as_ref()
        .unwrap()
        .ordered_components()
        .into_iter()
        .map(|c| c.id.clone())
        .collect()
}

#[tokio::test]
async fn test_open_unknown_page_fails() {
    let mut session = session_with(MemoryStore::new());
    let err = session.open("missing").await.unwrap_err();

    assert!(matches!(err, ShellError::PageNotFound(_)));
    assert!(matches!(session.status(), LoadStatus::Failed(_)));
    assert!(!session.add_from_palette("Title").is_applied());
}

#[tokio::test]
async fn test_open_by_slug_is_ready_and_valid() {
    let session = opened().await;
    assert_eq!(session.status(), &LoadStatus::Ready);
    assert!(session.state().validation_errors.is_empty());

    let header = session.header();
    assert_eq!(header.title, "Hearth Bakery");
    assert!(!header.can_save);
    assert!(!header.can_undo);
}

#[tokio::test]
async fn test_edit_save_and_exit() {
    let mut session = opened().await;
    assert_eq!(session.request_exit(), ExitDecision::Exit);

    assert!(session.add_from_palette("Title").is_applied());
    assert_eq!(count(&session), 9);
    assert_eq!(session.request_exit(), ExitDecision::ConfirmDiscard);
    assert!(session.header().can_save);

    let saved = session.save().await.unwrap();
    assert_eq!(saved.version, 2);
    assert!(!session.state().has_unsaved_changes);
    assert_eq!(session.state().page.as_ref().map(|p| p.version), Some(2));
    assert_eq!(session.request_exit(), ExitDecision::Exit);

    assert!(matches!(session.save().await, Err(ShellError::NothingToSave)));
}

#[tokio::test]
async fn test_validation_blocks_save() {
    let mut session = opened().await;
    session.handle_canvas_event(CanvasEvent::Click {
        component_id: "home-intro-title".to_string(),
    });
    assert!(session.set_field("text", "").unwrap().is_applied());

    assert_eq!(session.state().validation_errors.len(), 1);
    assert!(matches!(session.save().await, Err(ShellError::ValidationBlocked(1))));
    assert!(!session.state().is_saving);

    let form = session.property_form().unwrap();
    let text = form.fields.iter().find(|f| f.name == "text").unwrap();
    assert!(text.error.is_some());

    assert!(session.set_field("text", "Back again").unwrap().is_applied());
    assert!(session.state().validation_errors.is_empty());
}

#[tokio::test]
async fn test_set_field_errors_are_typed() {
    let mut session = opened().await;
    assert!(matches!(session.set_field("text", "Hi"), Err(ShellError::NoSelection)));

    session.handle_canvas_event(CanvasEvent::Click {
        component_id: "home-products".to_string(),
    });
    assert!(matches!(
        session.set_field("limit", "a dozen"),
        Err(ShellError::InvalidField { .. })
    ));
    assert!(matches!(
        session.set_field("flavour", "rye"),
        Err(ShellError::InvalidField { field, .. }) if field == "flavour"
    ));
    assert!(!session.state().has_unsaved_changes);
}

#[tokio::test]
async fn test_failed_save_keeps_changes() {
    let mut session = session_with(NullStore);
    session.open("home").await.unwrap();
    session.add_from_palette("Spacer");

    assert!(session.save().await.is_err());
    assert!(!session.state().is_saving);
    assert!(session.state().has_unsaved_changes);
}

#[tokio::test]
async fn test_keyboard_clipboard_and_undo() {
    let mut session = opened().await;
    session.handle_canvas_event(CanvasEvent::Click {
        component_id: "home-intro-title".to_string(),
    });

    assert_eq!(session.handle_key(&key("Ctrl+C")), KeyOutcome::Applied);
    assert_eq!(session.handle_key(&key("Ctrl+V")), KeyOutcome::Applied);
    assert_eq!(count(&session), 9);
    assert_eq!(session.state().selected_component_id.as_deref(), Some("new-1"));

    let section = session.state().page.as_ref().unwrap().find("home-intro").unwrap();
    let order: Vec<&str> = section.ordered_children().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec!["home-intro-title", "new-1", "home-intro-row"]);

    assert_eq!(session.handle_key(&key("Ctrl+Z")), KeyOutcome::Applied);
    assert_eq!(count(&session), 8);
    assert_eq!(session.handle_key(&key("Ctrl+S")), KeyOutcome::SaveRequested);
    assert_eq!(session.handle_key(&key("Alt+Q")), KeyOutcome::Ignored);
}

#[tokio::test]
async fn test_escape_unwinds_selection() {
    let mut session = opened().await;
    session.handle_canvas_event(CanvasEvent::Click {
        component_id: "home-hero".to_string(),
    });
    session.handle_key(&key("F2"));
    assert!(session.state().renaming_component_id.is_some());

    assert_eq!(session.handle_key(&key("Delete")), KeyOutcome::Ignored);
    session.handle_key(&key("Escape"));
    assert!(session.state().renaming_component_id.is_none());
    session.handle_key(&key("Escape"));
    assert!(session.state().selected_component_id.is_none());
    assert_eq!(session.handle_key(&key("Escape")), KeyOutcome::Ignored);
}

#[tokio::test]
async fn test_escape_cancels_drag_without_mutation() {
    let mut session = opened().await;
    let before = session.state().page.clone();

    session.handle_canvas_event(CanvasEvent::DragStart {
        source: DragSource::New {
            component_type: "Paragraph".to_string(),
        },
    });
    assert!(session.state().is_dragging);

    session.handle_canvas_event(CanvasEvent::DragOverRootZone {
        index: 0,
        pointer_y: 0.0,
        viewport: Viewport::new(0.0, 800.0),
    });
    assert_eq!(session.tick_autoscroll(), Some(-12.0));

    assert_eq!(session.handle_key(&key("Escape")), KeyOutcome::Applied);
    assert!(!session.state().is_dragging);
    assert_eq!(session.tick_autoscroll(), None);
    assert_eq!(session.state().page, before);
    assert!(!session.handle_canvas_event(CanvasEvent::Drop).is_applied());
}

#[tokio::test]
async fn test_drag_existing_to_root_zone() {
    let mut session = opened().await;
    session.handle_canvas_event(CanvasEvent::DragStart {
        source: DragSource::Existing {
            id: "home-products".to_string(),
        },
    });
    session.handle_canvas_event(CanvasEvent::DragOverRootZone {
        index: 0,
        pointer_y: 400.0,
        viewport: Viewport::new(0.0, 800.0),
    });

    let canvas = session.render();
    let active = canvas
        .nodes
        .iter()
        .filter(|n| n.attr("data-active") == Some("true"))
        .count();
    assert_eq!(active, 1);

    assert!(session.handle_canvas_event(CanvasEvent::Drop).is_applied());
    assert!(!session.state().is_dragging);
    assert_eq!(
        root_ids(&session),
        vec!["home-products", "home-hero", "home-intro", "home-hours"]
    );
    assert!(session.state().can_undo());
}

#[tokio::test]
async fn test_context_menu_command() {
    let mut session = opened().await;
    session.handle_canvas_event(CanvasEvent::ContextMenu {
        component_id: Some("home-hours".to_string()),
        x: 12.0,
        y: 40.0,
    });
    assert!(!session.context_menu().is_empty());

    assert!(session.run_menu_command(MenuCommand::MoveUp).is_applied());
    assert!(!session.state().context_menu.open);
    assert_eq!(
        root_ids(&session),
        vec!["home-hero", "home-intro", "home-hours", "home-products"]
    );
}

#[tokio::test]
async fn test_preview_toggle_changes_canvas() {
    let mut session = opened().await;
    let editing = session.render();
    assert!(editing.editing);
    assert_eq!(
        editing
            .nodes
            .iter()
            .filter(|n| n.attr("class") == Some(ROOT_ZONE_CLASS))
            .count(),
        5
    );

    assert_eq!(session.handle_key(&key("Ctrl+P")), KeyOutcome::Applied);
    let preview = session.render();
    assert!(!preview.editing);
    assert_eq!(preview.nodes.len(), 4);
    assert!(!session
        .handle_canvas_event(CanvasEvent::Click {
            component_id: "home-hero".to_string()
        })
        .is_applied());
    assert_eq!(session.handle_key(&key("Ctrl+D")), KeyOutcome::Ignored);
}

#[tokio::test]
async fn test_layers_follow_document() {
    let session = opened().await;
    let layers = session.layers();
    assert_eq!(layers.len(), 8);
    assert_eq!(layers[0].label, "Hero");
    assert_eq!(layers[2].depth, 1);
}
