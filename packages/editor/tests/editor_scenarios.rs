//! End-to-end editing scenarios driven through the store

use hearth_components::bakery_registry;
use hearth_document::{
    create_page, tree, ComponentInstance, PageDocument, PageDraft, SequentialIds,
};
use hearth_editor::{Action, ClipboardMode, DispatchOutcome, EditorState, Reducer, Store};
use std::collections::HashSet;
use std::sync::Arc;

fn store_with(components: Vec<ComponentInstance>) -> Store {
    let mut ids = SequentialIds::new("page");
    let page = create_page(
        &mut ids,
        PageDraft {
            components: Some(components),
            ..PageDraft::titled("Home")
        },
    );
    let reducer = Reducer::with_ids(Arc::new(bakery_registry()), SequentialIds::new("new"));
    Store::with_state(reducer, EditorState::with_page(page))
}

fn page(store: &Store) -> &PageDocument {
    store.state().page.as_ref().unwrap()
}

fn add(store: &mut Store, parent: Option<&str>, component_type: &str, index: usize) -> DispatchOutcome {
    store.dispatch(Action::AddComponent {
        parent_id: parent.map(str::to_string),
        component_type: component_type.to_string(),
        index,
    })
}

/// Tree shape without ids: (type, children shapes)
fn shape(node: &ComponentInstance) -> (String, Vec<(String, usize)>) {
    (
        node.component_type.clone(),
        node.ordered_children()
            .iter()
            .map(|c| (c.component_type.clone(), c.children().len()))
            .collect(),
    )
}

fn bakery_section() -> ComponentInstance {
    ComponentInstance::new("sec", "Section").with_children(vec![
        ComponentInstance::new("title", "Title").with_prop("text", "Our breads"),
        ComponentInstance::new("row", "FlexRow")
            .with_order(1)
            .with_children(vec![ComponentInstance::new("img", "Image")]),
    ])
}

#[test]
fn test_add_then_undo_restores_empty_page() {
    let mut store = store_with(vec![]);
    assert_eq!(add(&mut store, None, "Title", 0), DispatchOutcome::Applied);
    assert_eq!(page(&store).component_count(), 1);

    store.dispatch(Action::Undo);
    assert_eq!(page(&store).component_count(), 0);
    assert!(store.state().can_redo());
    assert!(store.state().selected_component_id.is_none());

    store.dispatch(Action::Redo);
    assert_eq!(page(&store).ordered_components()[0].component_type, "Title");
}

#[test]
fn test_nested_move_rejection() {
    let mut store = store_with(vec![ComponentInstance::new("a", "Section").with_children(vec![
        ComponentInstance::new("b", "Section").with_children(vec![]),
    ])]);
    let before = store.state().clone();

    let outcome = store.dispatch(Action::MoveComponent {
        id: "a".to_string(),
        new_parent_id: Some("b".to_string()),
        new_index: 0,
    });

    assert_eq!(outcome, DispatchOutcome::Rejected);
    assert_eq!(store.state(), &before);
}

#[test]
fn test_self_parent_rejection() {
    let mut store = store_with(vec![ComponentInstance::new("a", "Section").with_children(vec![])]);
    let outcome = store.dispatch(Action::MoveComponent {
        id: "a".to_string(),
        new_parent_id: Some("a".to_string()),
        new_index: 0,
    });
    assert_eq!(outcome, DispatchOutcome::Rejected);
    assert_eq!(store.state().history.len(), 1);
}

#[test]
fn test_move_into_container_and_back() {
    let mut store = store_with(vec![
        ComponentInstance::new("sec", "Section").with_children(vec![]),
        ComponentInstance::new("t", "Title").with_order(1),
    ]);

    store.dispatch(Action::MoveComponent {
        id: "t".to_string(),
        new_parent_id: Some("sec".to_string()),
        new_index: 0,
    });
    assert_eq!(
        tree::parent_id(&page(&store).components, "t"),
        Some(Some("sec".to_string()))
    );

    store.dispatch(Action::MoveComponent {
        id: "t".to_string(),
        new_parent_id: None,
        new_index: 0,
    });
    let roots: Vec<&str> = page(&store)
        .ordered_components()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(roots, vec!["t", "sec"]);
}

#[test]
fn test_cut_paste_preserves_shape_with_fresh_ids() {
    let mut store = store_with(vec![
        bakery_section(),
        ComponentInstance::new("sp", "Spacer").with_order(1),
    ]);
    let original_shape = shape(page(&store).find("sec").unwrap());

    store.dispatch(Action::Cut {
        id: "sec".to_string(),
    });
    assert!(!page(&store).contains("sec"));
    let clipboard = store.state().clipboard.as_ref().unwrap();
    assert_eq!(clipboard.mode, ClipboardMode::Cut);

    store.dispatch(Action::Paste {
        parent_id: None,
        index: 1,
    });

    let roots = page(&store).ordered_components();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].id, "sp");
    assert_eq!(shape(roots[1]), original_shape);
    assert_ne!(roots[1].id, "sec");
    assert!(!page(&store).contains("title"));
    assert!(store.state().clipboard.is_some());
}

#[test]
fn test_ids_unique_after_repeated_paste() {
    let mut store = store_with(vec![bakery_section()]);
    store.dispatch(Action::Copy {
        id: "sec".to_string(),
    });
    for _ in 0..3 {
        assert_eq!(
            store.dispatch(Action::Paste {
                parent_id: None,
                index: 0,
            }),
            DispatchOutcome::Applied
        );
    }

    let ids = tree::collect_ids(&page(&store).components);
    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(ids.len(), 16);
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_paste_into_accordion_respects_allowed_children() {
    let mut store = store_with(vec![
        ComponentInstance::new("acc", "Accordion").with_children(vec![]),
        ComponentInstance::new("t", "Title").with_order(1),
    ]);
    store.dispatch(Action::Copy { id: "t".to_string() });
    let outcome = store.dispatch(Action::Paste {
        parent_id: Some("acc".to_string()),
        index: 0,
    });
    assert_eq!(outcome, DispatchOutcome::Rejected);
}

#[test]
fn test_structural_edit_normalizes_orders() {
    let mut store = store_with(vec![
        ComponentInstance::new("a", "Spacer").with_order(5),
        ComponentInstance::new("b", "Spacer").with_order(2),
        ComponentInstance::new("c", "Spacer").with_order(9),
    ]);
    add(&mut store, None, "Divider", 1);

    let roots = page(&store).ordered_components();
    let orders: Vec<i64> = roots.iter().map(|c| c.order).collect();
    let ids: Vec<&str> = roots.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
    assert_eq!(ids, vec!["b", "new-1", "a", "c"]);
}

#[test]
fn test_selection_is_idempotent() {
    let mut store = store_with(vec![ComponentInstance::new("t", "Title")]);
    store.dispatch(Action::Select {
        id: Some("t".to_string()),
    });
    let once = store.state().clone();
    store.dispatch(Action::Select {
        id: Some("t".to_string()),
    });
    assert_eq!(store.state(), &once);
}

#[test]
fn test_history_is_bounded() {
    let mut store = store_with(vec![]);
    for _ in 0..60 {
        add(&mut store, None, "Spacer", 0);
    }
    let history = &store.state().history;
    assert_eq!(history.len(), 50);
    assert_eq!(history.index(), 49);
    assert_eq!(page(&store).component_count(), 60);

    for _ in 0..49 {
        store.dispatch(Action::Undo);
    }
    assert!(!store.state().can_undo());
    assert_eq!(page(&store).component_count(), 11);
}

#[test]
fn test_edit_after_undo_truncates_redo() {
    let mut store = store_with(vec![]);
    add(&mut store, None, "Spacer", 0);
    add(&mut store, None, "Divider", 1);
    store.dispatch(Action::Undo);
    assert!(store.state().can_redo());

    add(&mut store, None, "Title", 1);
    assert!(!store.state().can_redo());
    assert_eq!(store.dispatch(Action::Redo), DispatchOutcome::Rejected);
}

#[test]
fn test_set_page_resets_history_and_selection() {
    let mut store = store_with(vec![ComponentInstance::new("t", "Title")]);
    store.dispatch(Action::Select {
        id: Some("t".to_string()),
    });
    add(&mut store, None, "Spacer", 0);

    let mut ids = SequentialIds::new("other");
    let replacement = create_page(&mut ids, PageDraft::titled("About"));
    store.dispatch(Action::SetPage {
        page: replacement.clone(),
    });

    let state = store.state();
    assert_eq!(state.page.as_ref(), Some(&replacement));
    assert_eq!(state.history.len(), 1);
    assert!(state.selected_component_id.is_none());
    assert!(!state.has_unsaved_changes);
}
