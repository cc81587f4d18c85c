//! # Drag and Drop
//!
//! Finite state machine driven by pointer events from the canvas.
//!
//! ```text
//! Idle ──Start──▶ DraggingNew / DraggingExisting ──Over──▶ Hovering
//!   ▲                    │        ▲                          │
//!   │                    │        └─────────Leave────────────┤
//!   └────End / Cancel────┴─────────────Drop (commit)─────────┘
//! ```
//!
//! Hover and intent computation is pure. Only `Drop` while hovering a valid
//! target yields a [`DropCommit`], which converts into a reducer [`Action`].

use crate::actions::Action;
use hearth_components::ComponentRegistry;
use hearth_document::{tree, ComponentInstance, PageDocument};
use serde::{Deserialize, Serialize};

/// Bounding box of a rendered component, in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropIntent {
    Before,
    After,
    Inside,
    /// A modifier wraps the target
    Wrap,
}

/// Intent from pointer position: outer quarters are before/after, the
/// middle half is inside for containers, otherwise the nearest half wins.
pub fn resolve_intent(rect: &Rect, pointer_y: f64, accepts_children: bool) -> DropIntent {
    if rect.height <= 0.0 {
        return DropIntent::After;
    }
    let offset = ((pointer_y - rect.top) / rect.height).clamp(0.0, 1.0);
    if offset < 0.25 {
        DropIntent::Before
    } else if offset > 0.75 {
        DropIntent::After
    } else if accepts_children {
        DropIntent::Inside
    } else if offset < 0.5 {
        DropIntent::Before
    } else {
        DropIntent::After
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DragSource {
    /// A palette item
    #[serde(rename_all = "camelCase")]
    New { component_type: String },
    /// A component already on the page
    Existing { id: String },
}

/// Where a drop would land
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    /// Component under the pointer; `None` for canvas root strips
    pub target_id: Option<String>,
    pub intent: DropIntent,
    /// Destination sibling list (`None` = page root)
    pub parent_id: Option<String>,
    /// Index in the destination list after the source is detached
    pub index: usize,
    /// Depth of the target component (0 = root)
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingNew {
        component_type: String,
    },
    DraggingExisting {
        id: String,
    },
    Hovering {
        source: DragSource,
        target: DropTarget,
    },
}

impl DragState {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    pub fn source(&self) -> Option<DragSource> {
        match self {
            DragState::Idle => None,
            DragState::DraggingNew { component_type } => Some(DragSource::New {
                component_type: component_type.clone(),
            }),
            DragState::DraggingExisting { id } => Some(DragSource::Existing { id: id.clone() }),
            DragState::Hovering { source, .. } => Some(source.clone()),
        }
    }

    pub fn target(&self) -> Option<&DropTarget> {
        match self {
            DragState::Hovering { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Id of the component being dragged, for existing components
    pub fn dragging_id(&self) -> Option<&str> {
        match self {
            DragState::DraggingExisting { id } => Some(id),
            DragState::Hovering {
                source: DragSource::Existing { id },
                ..
            } => Some(id),
            _ => None,
        }
    }

    fn from_source(source: DragSource) -> Self {
        match source {
            DragSource::New { component_type } => DragState::DraggingNew { component_type },
            DragSource::Existing { id } => DragState::DraggingExisting { id },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Start(DragSource),
    /// Pointer over a rendered component
    Over {
        target_id: String,
        rect: Rect,
        pointer_y: f64,
    },
    /// Pointer over the canvas strip before root position `index`
    OverRootZone {
        index: usize,
    },
    Leave {
        target_id: Option<String>,
    },
    Drop,
    /// Drag ended without a drop
    End,
    /// Escape pressed
    Cancel,
}

/// Document change requested by a completed drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropCommit {
    Insert {
        component_type: String,
        parent_id: Option<String>,
        index: usize,
    },
    Move {
        id: String,
        parent_id: Option<String>,
        index: usize,
    },
    Wrap {
        target_id: String,
        modifier_type: String,
    },
}

impl DropCommit {
    pub fn into_action(self) -> Action {
        match self {
            DropCommit::Insert {
                component_type,
                parent_id,
                index,
            } => Action::AddComponent {
                parent_id,
                component_type,
                index,
            },
            DropCommit::Move {
                id,
                parent_id,
                index,
            } => Action::MoveComponent {
                id,
                new_parent_id: parent_id,
                new_index: index,
            },
            DropCommit::Wrap {
                target_id,
                modifier_type,
            } => Action::WrapComponent {
                target_id,
                modifier_type,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Advance the machine; returns a commit only for a drop on a valid target
    pub fn handle(
        &mut self,
        event: DragEvent,
        page: &PageDocument,
        registry: &ComponentRegistry,
    ) -> Option<DropCommit> {
        match event {
            DragEvent::Start(source) => {
                if source_is_draggable(&source, page, registry) {
                    tracing::debug!(?source, "Drag started");
                    self.state = DragState::from_source(source);
                } else {
                    self.state = DragState::Idle;
                }
                None
            }
            DragEvent::Over {
                target_id,
                rect,
                pointer_y,
            } => {
                let source = self.state.source()?;
                let target = resolve_target(&source, &target_id, &rect, pointer_y, page, registry);
                self.hover(source, target);
                None
            }
            DragEvent::OverRootZone { index } => {
                let source = self.state.source()?;
                let target = resolve_root_target(&source, index, page, registry);
                self.hover(source, target);
                None
            }
            DragEvent::Leave { target_id } => {
                if let DragState::Hovering { source, target } = &self.state {
                    if target.target_id == target_id {
                        self.state = DragState::from_source(source.clone());
                    }
                }
                None
            }
            DragEvent::Drop => {
                let state = std::mem::take(&mut self.state);
                let DragState::Hovering { source, target } = state else {
                    return None;
                };
                let commit = commit_for(source, target);
                tracing::debug!(?commit, "Drop committed");
                Some(commit)
            }
            DragEvent::End | DragEvent::Cancel => {
                self.state = DragState::Idle;
                None
            }
        }
    }

    fn hover(&mut self, source: DragSource, target: Option<DropTarget>) {
        self.state = match target {
            Some(target) => DragState::Hovering { source, target },
            None => DragState::from_source(source),
        };
    }
}

fn source_is_draggable(source: &DragSource, page: &PageDocument, registry: &ComponentRegistry) -> bool {
    match source {
        DragSource::New { component_type } => registry.contains(component_type),
        DragSource::Existing { id } => page.find(id).map_or(false, |node| !node.is_locked()),
    }
}

fn commit_for(source: DragSource, target: DropTarget) -> DropCommit {
    match (source, target.intent, target.target_id) {
        (DragSource::New { component_type }, DropIntent::Wrap, Some(target_id)) => {
            DropCommit::Wrap {
                target_id,
                modifier_type: component_type,
            }
        }
        (DragSource::New { component_type }, _, _) => DropCommit::Insert {
            component_type,
            parent_id: target.parent_id,
            index: target.index,
        },
        (DragSource::Existing { id }, _, _) => DropCommit::Move {
            id,
            parent_id: target.parent_id,
            index: target.index,
        },
    }
}

/// Component type carried by the source, and whether it is a modifier
fn source_type(
    source: &DragSource,
    page: &PageDocument,
    registry: &ComponentRegistry,
) -> Option<(String, bool)> {
    let component_type = match source {
        DragSource::New { component_type } => component_type.clone(),
        DragSource::Existing { id } => page.find(id)?.component_type.clone(),
    };
    let is_modifier = matches!(source, DragSource::New { .. })
        && registry.get(&component_type).map_or(false, |e| e.is_modifier);
    Some((component_type, is_modifier))
}

/// Parent id and position among siblings sorted by `order`
fn sibling_position(page: &PageDocument, id: &str) -> Option<(Option<String>, usize)> {
    let parent_id = tree::parent_id(&page.components, id)?;
    let siblings: Vec<&ComponentInstance> = match &parent_id {
        Some(parent) => page.find(parent)?.ordered_children(),
        None => page.ordered_components(),
    };
    let index = siblings.iter().position(|node| node.id == id)?;
    Some((parent_id, index))
}

fn accepts(
    page: &PageDocument,
    registry: &ComponentRegistry,
    parent_id: Option<&str>,
    child_type: &str,
) -> bool {
    let Some(parent_id) = parent_id else {
        return true;
    };
    match page.find(parent_id) {
        Some(parent) if parent.is_container() => registry
            .get(&parent.component_type)
            .map_or(true, |entry| entry.accepts_child(child_type)),
        _ => false,
    }
}

fn resolve_target(
    source: &DragSource,
    target_id: &str,
    rect: &Rect,
    pointer_y: f64,
    page: &PageDocument,
    registry: &ComponentRegistry,
) -> Option<DropTarget> {
    let target = page.find(target_id)?;
    let depth = tree::find_path(&page.components, target_id)?.len() - 1;
    let (component_type, is_modifier) = source_type(source, page, registry)?;

    if let DragSource::Existing { id } = source {
        if id == target_id || tree::is_descendant(&page.components, id, target_id) {
            return None;
        }
    }

    let (parent_id, position) = sibling_position(page, target_id)?;

    if is_modifier {
        let modifier = registry.get(&component_type)?;
        if target.is_locked()
            || !modifier.accepts_child(&target.component_type)
            || !accepts(page, registry, parent_id.as_deref(), &component_type)
        {
            return None;
        }
        return Some(DropTarget {
            target_id: Some(target_id.to_string()),
            intent: DropIntent::Wrap,
            parent_id,
            index: position,
            depth,
        });
    }

    let can_nest = target.is_container()
        && registry
            .get(&target.component_type)
            .map_or(true, |entry| entry.accepts_child(&component_type));
    let intent = resolve_intent(rect, pointer_y, can_nest);

    let (parent_id, index) = match intent {
        DropIntent::Inside => (Some(target_id.to_string()), target.children().len()),
        DropIntent::Before => (parent_id, position),
        DropIntent::After => (parent_id, position + 1),
        DropIntent::Wrap => return None,
    };
    if !accepts(page, registry, parent_id.as_deref(), &component_type) {
        return None;
    }
    let index = adjust_for_detach(source, page, parent_id.as_deref(), index)?;

    Some(DropTarget {
        target_id: Some(target_id.to_string()),
        intent,
        parent_id,
        index,
        depth,
    })
}

fn resolve_root_target(
    source: &DragSource,
    index: usize,
    page: &PageDocument,
    registry: &ComponentRegistry,
) -> Option<DropTarget> {
    let (_, is_modifier) = source_type(source, page, registry)?;
    if is_modifier {
        return None;
    }
    let index = adjust_for_detach(source, page, None, index.min(page.components.len()))?;
    Some(DropTarget {
        target_id: None,
        intent: DropIntent::Before,
        parent_id: None,
        index,
        depth: 0,
    })
}

/// Convert a pre-detach index into the post-detach index used by moves.
/// `None` when the move would leave the source where it already is.
fn adjust_for_detach(
    source: &DragSource,
    page: &PageDocument,
    parent_id: Option<&str>,
    index: usize,
) -> Option<usize> {
    let DragSource::Existing { id } = source else {
        return Some(index);
    };
    let (source_parent, source_index) = sibling_position(page, id)?;
    if source_parent.as_deref() != parent_id {
        return Some(index);
    }
    let adjusted = if source_index < index { index - 1 } else { index };
    (adjusted != source_index).then_some(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_components::bakery_registry;
    use hearth_document::{create_page, PageDraft, SequentialIds};

    fn page() -> PageDocument {
        let mut ids = SequentialIds::new("p");
        create_page(
            &mut ids,
            PageDraft {
                components: Some(vec![
                    ComponentInstance::new("s", "Section").with_children(vec![
                        ComponentInstance::new("t", "Title"),
                        ComponentInstance::new("p", "Paragraph").with_order(1),
                    ]),
                    ComponentInstance::new("sp", "Spacer").with_order(1),
                    ComponentInstance::new("d", "Divider").with_order(2),
                ]),
                ..PageDraft::default()
            },
        )
    }

    fn rect() -> Rect {
        Rect::new(0.0, 100.0, 400.0, 100.0)
    }

    #[test]
    fn test_intent_bands() {
        let r = rect();
        assert_eq!(resolve_intent(&r, 110.0, true), DropIntent::Before);
        assert_eq!(resolve_intent(&r, 190.0, true), DropIntent::After);
        assert_eq!(resolve_intent(&r, 150.0, true), DropIntent::Inside);
        assert_eq!(resolve_intent(&r, 140.0, false), DropIntent::Before);
        assert_eq!(resolve_intent(&r, 160.0, false), DropIntent::After);
        assert_eq!(resolve_intent(&r, 20.0, false), DropIntent::Before);
    }

    #[test]
    fn test_new_component_dropped_inside_section() {
        let page = page();
        let registry = bakery_registry();
        let mut machine = DragMachine::new();

        machine.handle(
            DragEvent::Start(DragSource::New {
                component_type: "Button".to_string(),
            }),
            &page,
            &registry,
        );
        machine.handle(
            DragEvent::Over {
                target_id: "s".to_string(),
                rect: rect(),
                pointer_y: 150.0,
            },
            &page,
            &registry,
        );
        assert_eq!(machine.state().target().unwrap().intent, DropIntent::Inside);

        let commit = machine.handle(DragEvent::Drop, &page, &registry);
        assert_eq!(
            commit,
            Some(DropCommit::Insert {
                component_type: "Button".to_string(),
                parent_id: Some("s".to_string()),
                index: 2,
            })
        );
        assert!(!machine.is_active());
    }

    #[test]
    fn test_modifier_source_wraps() {
        let page = page();
        let registry = bakery_registry();
        let mut machine = DragMachine::new();

        machine.handle(
            DragEvent::Start(DragSource::New {
                component_type: "Animate".to_string(),
            }),
            &page,
            &registry,
        );
        machine.handle(
            DragEvent::Over {
                target_id: "t".to_string(),
                rect: rect(),
                pointer_y: 110.0,
            },
            &page,
            &registry,
        );
        let commit = machine.handle(DragEvent::Drop, &page, &registry).unwrap();
        assert_eq!(
            commit.into_action(),
            Action::WrapComponent {
                target_id: "t".to_string(),
                modifier_type: "Animate".to_string(),
            }
        );
    }

    #[test]
    fn test_existing_onto_own_subtree_has_no_target() {
        let page = page();
        let registry = bakery_registry();
        let mut machine = DragMachine::new();

        machine.handle(
            DragEvent::Start(DragSource::Existing { id: "s".to_string() }),
            &page,
            &registry,
        );
        machine.handle(
            DragEvent::Over {
                target_id: "t".to_string(),
                rect: rect(),
                pointer_y: 150.0,
            },
            &page,
            &registry,
        );
        assert!(machine.state().target().is_none());
        assert_eq!(machine.handle(DragEvent::Drop, &page, &registry), None);
    }

    #[test]
    fn test_move_down_within_same_parent_adjusts_index() {
        let page = page();
        let registry = bakery_registry();
        let mut machine = DragMachine::new();

        machine.handle(
            DragEvent::Start(DragSource::Existing { id: "sp".to_string() }),
            &page,
            &registry,
        );
        // After the divider: pre-detach index 3, post-detach 2
        machine.handle(
            DragEvent::Over {
                target_id: "d".to_string(),
                rect: rect(),
                pointer_y: 195.0,
            },
            &page,
            &registry,
        );
        let commit = machine.handle(DragEvent::Drop, &page, &registry);
        assert_eq!(
            commit,
            Some(DropCommit::Move {
                id: "sp".to_string(),
                parent_id: None,
                index: 2,
            })
        );
    }

    #[test]
    fn test_cancel_returns_to_idle_without_commit() {
        let page = page();
        let registry = bakery_registry();
        let mut machine = DragMachine::new();

        machine.handle(
            DragEvent::Start(DragSource::New {
                component_type: "Title".to_string(),
            }),
            &page,
            &registry,
        );
        machine.handle(DragEvent::OverRootZone { index: 0 }, &page, &registry);
        assert!(machine.state().target().is_some());

        assert_eq!(machine.handle(DragEvent::Cancel, &page, &registry), None);
        assert_eq!(machine.state(), &DragState::Idle);
        assert_eq!(machine.handle(DragEvent::Drop, &page, &registry), None);
    }

    #[test]
    fn test_leave_clears_matching_target() {
        let page = page();
        let registry = bakery_registry();
        let mut machine = DragMachine::new();

        machine.handle(
            DragEvent::Start(DragSource::Existing { id: "d".to_string() }),
            &page,
            &registry,
        );
        machine.handle(
            DragEvent::Over {
                target_id: "sp".to_string(),
                rect: rect(),
                pointer_y: 110.0,
            },
            &page,
            &registry,
        );
        assert!(machine.state().target().is_some());
        assert_eq!(machine.state().dragging_id(), Some("d"));

        machine.handle(
            DragEvent::Leave {
                target_id: Some("sp".to_string()),
            },
            &page,
            &registry,
        );
        assert_eq!(
            machine.state(),
            &DragState::DraggingExisting { id: "d".to_string() }
        );
    }
}
