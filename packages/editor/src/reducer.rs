//! # Editor Reducer
//!
//! `(state, action) -> state`. Every action either produces a new
//! [`EditorState`] or is rejected, in which case the input state is returned
//! unchanged and nothing is recorded in history.
//!
//! Structural actions operate on a normalized working copy of the page (all
//! sibling groups sorted by `order` and renumbered) so that user-facing
//! indexes and array positions agree. Each structural change is expressed
//! through the path-based helpers in [`hearth_document::tree`].

use crate::actions::Action;
use crate::history::History;
use crate::state::{ClipboardEntry, ClipboardMode, ContextMenuState, EditorState};
use hearth_components::ComponentRegistry;
use hearth_document::{
    create_component_instance, tree, ComponentInstance, IdGenerator, PageDocument, UuidGenerator,
};
use std::sync::Arc;
use tracing::debug;

pub struct Reducer {
    registry: Arc<ComponentRegistry>,
    ids: Box<dyn IdGenerator + Send>,
}

impl Reducer {
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self::with_ids(registry, UuidGenerator)
    }

    /// Reducer drawing fresh instance ids from `ids`
    pub fn with_ids(registry: Arc<ComponentRegistry>, ids: impl IdGenerator + Send + 'static) -> Self {
        Self {
            registry,
            ids: Box::new(ids),
        }
    }

    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Apply `action`; rejected actions yield a clone of `state`
    pub fn reduce(&mut self, state: &EditorState, action: Action) -> EditorState {
        self.try_reduce(state, action)
            .unwrap_or_else(|| state.clone())
    }

    /// Apply `action`, or `None` when it is rejected
    pub fn try_reduce(&mut self, state: &EditorState, action: Action) -> Option<EditorState> {
        match action {
            Action::SetPage { page } => Some(set_page(state, page)),
            Action::AddComponent {
                parent_id,
                component_type,
                index,
            } => self.add_component(state, parent_id.as_deref(), &component_type, index),
            Action::RemoveComponent { id } => remove_component(state, &id),
            Action::UpdateComponentProps { id, props } => {
                let mut page = working_page(state)?;
                let node = tree::find_mut(&mut page.components, &id)?;
                for (key, value) in props {
                    node.props.insert(key, value);
                }
                Some(commit(state, page))
            }
            Action::MoveComponent {
                id,
                new_parent_id,
                new_index,
            } => self.move_component(state, &id, new_parent_id.as_deref(), new_index),
            Action::Copy { id } => {
                let instance = state.page.as_ref()?.find(&id)?.clone();
                Some(EditorState {
                    clipboard: Some(ClipboardEntry {
                        instance,
                        mode: ClipboardMode::Copy,
                    }),
                    ..state.clone()
                })
            }
            Action::Cut { id } => {
                let mut page = working_page(state)?;
                let instance = tree::remove(&mut page.components, &id)?;
                let mut next = commit(state, page);
                next.clipboard = Some(ClipboardEntry {
                    instance,
                    mode: ClipboardMode::Cut,
                });
                Some(next)
            }
            Action::Paste { parent_id, index } => self.paste(state, parent_id.as_deref(), index),
            Action::Duplicate { id } => self.duplicate(state, &id),
            Action::WrapComponent {
                target_id,
                modifier_type,
            } => self.wrap_component(state, &target_id, &modifier_type),
            Action::SetLocked { id, locked } => set_locked(state, &id, locked),
            Action::UpdatePageMetadata { metadata } => {
                let mut page = state.page.clone()?;
                if page.metadata == metadata {
                    return None;
                }
                page.metadata = metadata;
                Some(commit(state, page))
            }
            Action::UpdatePageSettings { settings } => {
                let mut page = state.page.clone()?;
                if page.settings == settings {
                    return None;
                }
                page.settings = settings;
                Some(commit(state, page))
            }
            Action::StartRename { id } => {
                if !state.page.as_ref()?.contains(&id) {
                    return None;
                }
                Some(EditorState {
                    renaming_component_id: Some(id),
                    ..state.clone()
                })
            }
            Action::CommitRename { id, name } => commit_rename(state, &id, &name),
            Action::StopRename => Some(EditorState {
                renaming_component_id: None,
                ..state.clone()
            }),
            Action::Undo => time_travel(state, |history| history.undo().cloned()),
            Action::Redo => time_travel(state, |history| history.redo().cloned()),
            Action::SetValidationErrors { errors } => Some(EditorState {
                validation_errors: errors,
                ..state.clone()
            }),
            Action::TogglePreview => Some(EditorState {
                preview_mode: !state.preview_mode,
                hovered_component_id: None,
                context_menu: ContextMenuState::default(),
                ..state.clone()
            }),
            Action::Select { id } => select(state, id),
            Action::Hover { id } => {
                if let Some(id) = &id {
                    if !state.page.as_ref()?.contains(id) {
                        return None;
                    }
                }
                Some(EditorState {
                    hovered_component_id: id,
                    ..state.clone()
                })
            }
            Action::StartDrag { component_type } => {
                if let Some(component_type) = &component_type {
                    if !self.registry.contains(component_type) {
                        return None;
                    }
                }
                Some(EditorState {
                    is_dragging: true,
                    dragged_component_type: component_type,
                    ..state.clone()
                })
            }
            Action::EndDrag => Some(EditorState {
                is_dragging: false,
                dragged_component_type: None,
                ..state.clone()
            }),
            Action::SetSaving { saving } => Some(EditorState {
                is_saving: saving,
                ..state.clone()
            }),
            Action::SaveSucceeded {
                updated_at,
                version,
            } => {
                let mut page = state.page.clone()?;
                page.updated_at = updated_at;
                page.version = version;
                Some(EditorState {
                    page: Some(page),
                    is_saving: false,
                    has_unsaved_changes: false,
                    ..state.clone()
                })
            }
            Action::SaveFailed => Some(EditorState {
                is_saving: false,
                ..state.clone()
            }),
            Action::SetSidebarTab { tab } => Some(EditorState {
                sidebar_tab: tab,
                ..state.clone()
            }),
            Action::OpenContextMenu { x, y, target_id } => {
                if let Some(id) = &target_id {
                    if !state.page.as_ref()?.contains(id) {
                        return None;
                    }
                }
                Some(EditorState {
                    context_menu: ContextMenuState {
                        open: true,
                        x,
                        y,
                        target_id,
                    },
                    ..state.clone()
                })
            }
            Action::CloseContextMenu => Some(EditorState {
                context_menu: ContextMenuState::default(),
                ..state.clone()
            }),
        }
    }

    fn add_component(
        &mut self,
        state: &EditorState,
        parent_id: Option<&str>,
        component_type: &str,
        index: usize,
    ) -> Option<EditorState> {
        let registry = Arc::clone(&self.registry);
        let entry = registry.get(component_type)?;
        if entry.is_modifier {
            debug!(component_type, "Modifiers can only wrap an existing component");
            return None;
        }

        let mut page = working_page(state)?;
        if !self.parent_accepts(&page, parent_id, component_type) {
            return None;
        }

        let instance = create_component_instance(
            self.ids.as_mut(),
            component_type,
            entry.instantiate_props(),
            index as i64,
            entry.accepts_children,
        );
        let new_id = instance.id.clone();
        tree::insert_into(&mut page.components, parent_id, index, instance).ok()?;

        let mut next = commit(state, page);
        next.selected_component_id = Some(new_id);
        Some(next)
    }

    fn move_component(
        &mut self,
        state: &EditorState,
        id: &str,
        new_parent_id: Option<&str>,
        new_index: usize,
    ) -> Option<EditorState> {
        let mut page = working_page(state)?;
        let path = tree::find_path(&page.components, id)?;
        let node = tree::get(&page.components, &path)?;

        if node.is_locked() {
            debug!(id, "Locked components cannot be moved");
            return None;
        }
        if let Some(parent_id) = new_parent_id {
            if parent_id == id || tree::is_descendant(&page.components, id, parent_id) {
                debug!(id, parent_id, "Move rejected: would create a cycle");
                return None;
            }
        }
        let component_type = node.component_type.clone();
        if !self.parent_accepts(&page, new_parent_id, &component_type) {
            return None;
        }

        let before = page.components.clone();
        let detached = tree::remove_at(&mut page.components, &path)?;
        tree::insert_into(&mut page.components, new_parent_id, new_index, detached).ok()?;
        if page.components == before {
            return None;
        }

        Some(commit(state, page))
    }

    fn paste(
        &mut self,
        state: &EditorState,
        parent_id: Option<&str>,
        index: usize,
    ) -> Option<EditorState> {
        let clipboard = state.clipboard.as_ref()?;
        let mut page = working_page(state)?;
        if !self.parent_accepts(&page, parent_id, &clipboard.instance.component_type) {
            return None;
        }

        let mut instance = clipboard.instance.clone();
        tree::reassign_ids(&mut instance, self.ids.as_mut());
        let new_id = instance.id.clone();
        let selectable = !instance.is_locked();
        tree::insert_into(&mut page.components, parent_id, index, instance).ok()?;

        let mut next = commit(state, page);
        if selectable {
            next.selected_component_id = Some(new_id);
        }
        Some(next)
    }

    fn duplicate(&mut self, state: &EditorState, id: &str) -> Option<EditorState> {
        let mut page = working_page(state)?;
        let path = tree::find_path(&page.components, id)?;
        let (index, parent_path) = path.split_last()?;

        let mut copy = tree::get(&page.components, &path)?.clone();
        tree::reassign_ids(&mut copy, self.ids.as_mut());
        let new_id = copy.id.clone();
        let selectable = !copy.is_locked();
        tree::insert_at(&mut page.components, parent_path, index + 1, copy).ok()?;

        let mut next = commit(state, page);
        if selectable {
            next.selected_component_id = Some(new_id);
        }
        Some(next)
    }

    fn wrap_component(
        &mut self,
        state: &EditorState,
        target_id: &str,
        modifier_type: &str,
    ) -> Option<EditorState> {
        let registry = Arc::clone(&self.registry);
        let entry = registry.get(modifier_type)?;
        if !entry.is_modifier {
            return None;
        }

        let mut page = working_page(state)?;
        let path = tree::find_path(&page.components, target_id)?;
        let target = tree::get(&page.components, &path)?;
        if target.is_locked() || !entry.accepts_child(&target.component_type) {
            return None;
        }
        let parent_id = tree::parent_id(&page.components, target_id)?;
        if !self.parent_accepts(&page, parent_id.as_deref(), modifier_type) {
            return None;
        }

        let (index, parent_path) = path.split_last()?;
        let mut target = tree::remove_at(&mut page.components, &path)?;
        target.order = 0;

        let mut wrapper = create_component_instance(
            self.ids.as_mut(),
            modifier_type,
            entry.instantiate_props(),
            *index as i64,
            true,
        );
        wrapper.children = Some(vec![target]);
        let wrapper_id = wrapper.id.clone();
        tree::insert_at(&mut page.components, parent_path, *index, wrapper).ok()?;

        let mut next = commit(state, page);
        next.selected_component_id = Some(wrapper_id);
        Some(next)
    }

    /// Whether a `child_type` may be inserted under `parent_id` (`None` = page root)
    fn parent_accepts(&self, page: &PageDocument, parent_id: Option<&str>, child_type: &str) -> bool {
        let Some(parent_id) = parent_id else {
            return true;
        };
        let Some(parent) = page.find(parent_id) else {
            debug!(parent_id, "Parent not found");
            return false;
        };
        if !parent.is_container() {
            debug!(parent_id, "Parent does not accept children");
            return false;
        }
        match self.registry.get(&parent.component_type) {
            Some(entry) if !entry.accepts_child(child_type) => {
                debug!(
                    parent_type = %parent.component_type,
                    child_type,
                    "Child type not allowed in parent"
                );
                false
            }
            _ => true,
        }
    }
}

/// Clone of the current page with every sibling group normalized
fn working_page(state: &EditorState) -> Option<PageDocument> {
    let mut page = state.page.clone()?;
    tree::normalize_all(&mut page.components);
    Some(page)
}

/// Install `page` as the new current document and record it in history
fn commit(state: &EditorState, page: PageDocument) -> EditorState {
    let mut next = state.clone();
    next.history.push(page.clone());
    next.page = Some(page);
    next.has_unsaved_changes = true;
    clear_dangling(&mut next);
    next
}

/// Drop references to components that no longer exist
fn clear_dangling(state: &mut EditorState) {
    let Some(page) = state.page.as_ref() else {
        return;
    };
    let exists = |id: &Option<String>| id.as_deref().map_or(true, |id| page.contains(id));

    if !exists(&state.selected_component_id) {
        state.selected_component_id = None;
    }
    if !exists(&state.hovered_component_id) {
        state.hovered_component_id = None;
    }
    if !exists(&state.renaming_component_id) {
        state.renaming_component_id = None;
    }
    if !exists(&state.context_menu.target_id) {
        state.context_menu = ContextMenuState::default();
    }
}

fn set_page(state: &EditorState, page: PageDocument) -> EditorState {
    debug!(page_id = %page.id, components = page.component_count(), "Page loaded into editor");
    EditorState {
        clipboard: state.clipboard.clone(),
        preview_mode: state.preview_mode,
        sidebar_tab: state.sidebar_tab,
        ..EditorState::with_page(page)
    }
}

fn remove_component(state: &EditorState, id: &str) -> Option<EditorState> {
    let mut page = working_page(state)?;
    tree::remove(&mut page.components, id)?;
    Some(commit(state, page))
}

fn set_locked(state: &EditorState, id: &str, locked: bool) -> Option<EditorState> {
    let mut page = state.page.clone()?;
    let node = tree::find_mut(&mut page.components, id)?;
    if node.is_locked() == locked {
        return None;
    }
    node.locked = locked.then_some(true);

    let mut next = commit(state, page);
    if locked && next.selected_component_id.as_deref() == Some(id) {
        next.selected_component_id = None;
    }
    Some(next)
}

fn commit_rename(state: &EditorState, id: &str, name: &str) -> Option<EditorState> {
    let mut page = state.page.clone()?;
    let node = tree::find_mut(&mut page.components, id)?;
    let name = name.trim();
    let name = (!name.is_empty()).then(|| name.to_string());

    if node.name == name {
        return Some(EditorState {
            renaming_component_id: None,
            ..state.clone()
        });
    }
    node.name = name;

    let mut next = commit(state, page);
    next.renaming_component_id = None;
    Some(next)
}

fn time_travel(
    state: &EditorState,
    step: impl FnOnce(&mut History) -> Option<PageDocument>,
) -> Option<EditorState> {
    let current = state.page.as_ref()?;
    let mut next = state.clone();
    let mut restored = step(&mut next.history)?;

    // Save bookkeeping belongs to the stored page, not the snapshot
    restored.version = current.version;
    restored.updated_at = current.updated_at;

    next.page = Some(restored);
    next.has_unsaved_changes = true;
    clear_dangling(&mut next);
    Some(next)
}

fn select(state: &EditorState, id: Option<String>) -> Option<EditorState> {
    let Some(id) = id else {
        return Some(EditorState {
            selected_component_id: None,
            ..state.clone()
        });
    };
    let node: &ComponentInstance = state.page.as_ref()?.find(&id)?;
    if node.is_locked() {
        return None;
    }
    Some(EditorState {
        selected_component_id: Some(id),
        ..state.clone()
    })
}

/// Outcome of [`Store::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied,
    Rejected,
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied)
    }
}

/// Owns the current [`EditorState`] and the reducer that advances it
pub struct Store {
    state: EditorState,
    reducer: Reducer,
}

impl Store {
    pub fn new(reducer: Reducer) -> Self {
        Self::with_state(reducer, EditorState::default())
    }

    pub fn with_state(reducer: Reducer, state: EditorState) -> Self {
        Self { state, reducer }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        self.reducer.registry()
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchOutcome {
        let name = action.name();
        let structural = action.changes_document();
        match self.reducer.try_reduce(&self.state, action) {
            Some(next) => {
                self.state = next;
                if structural {
                    debug!(
                        action = name,
                        history_index = self.state.history.index(),
                        history_len = self.state.history.len(),
                        "Action applied"
                    );
                }
                DispatchOutcome::Applied
            }
            None => {
                debug!(action = name, "Action rejected");
                DispatchOutcome::Rejected
            }
        }
    }
}
