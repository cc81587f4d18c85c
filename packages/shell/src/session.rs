//! # Editor Session
//!
//! Owns everything the editor screen needs for one open page: the editor
//! [`Store`], the drag machine, the auto-scroller and the load status. UI
//! hosts forward keyboard and canvas events here and read view models back.
//!
//! ```text
//! open(id) ──► PageService ──► SetPage ──► validate ──► Ready
//!
//! CanvasEvent ──► DragMachine ──► DropCommit ──► dispatch(Action)
//! KeyChord    ──► Keymap      ──► Command    ──► dispatch(Action)
//!                                                   │
//!                                                   ▼
//!                                        Store (reducer + history)
//! ```

use crate::canvas::{compose_canvas, AutoScroller, CanvasView, Viewport};
use crate::context_menu::{command_action, context_menu_items, paste_position, MenuCommand, MenuItem};
use crate::errors::{Result, ShellError};
use crate::header::HeaderView;
use crate::keymap::{Command, KeyChord, Keymap};
use crate::layers::{layer_rows, LayerRow};
use crate::palette::{click_to_add, palette_groups, PaletteGroup};
use crate::property_panel::{parse_field_input, property_form, update_field, PropertyForm};
use hearth_components::ComponentRegistry;
use hearth_document::PageDocument;
use hearth_editor::{
    validate_page, Action, DispatchOutcome, DragEvent, DragMachine, DragSource, DragState,
    EditorState, Rect, Reducer, Store,
};
use hearth_persistence::{OverrideStore, PageService};
use hearth_renderer::{Overlay, RenderMode, Renderer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    Exit,
    /// Unsaved changes; ask before leaving
    ConfirmDiscard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Applied,
    Rejected,
    /// Ctrl+S: the host should await [`EditorSession::save`]
    SaveRequested,
    Ignored,
}

impl From<DispatchOutcome> for KeyOutcome {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Applied => KeyOutcome::Applied,
            DispatchOutcome::Rejected => KeyOutcome::Rejected,
        }
    }
}

/// Pointer events from the editing canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CanvasEvent {
    Click {
        component_id: String,
    },
    /// Click on empty canvas
    CanvasClick,
    ContextMenu {
        component_id: Option<String>,
        x: f64,
        y: f64,
    },
    Hover {
        component_id: Option<String>,
    },
    DragStart {
        source: DragSource,
    },
    DragOver {
        component_id: String,
        rect: Rect,
        pointer_y: f64,
        viewport: Viewport,
    },
    DragOverRootZone {
        index: usize,
        pointer_y: f64,
        viewport: Viewport,
    },
    DragLeave {
        component_id: Option<String>,
    },
    Drop,
    DragEnd,
}

pub struct EditorSession<S: OverrideStore> {
    service: Arc<PageService<S>>,
    store: Store,
    drag: DragMachine,
    scroller: AutoScroller,
    active_root_zone: Option<usize>,
    keymap: Keymap,
    status: LoadStatus,
}

impl<S: OverrideStore> EditorSession<S> {
    pub fn new(registry: Arc<ComponentRegistry>, service: Arc<PageService<S>>) -> Self {
        Self::with_reducer(Reducer::new(registry), service)
    }

    pub fn with_reducer(reducer: Reducer, service: Arc<PageService<S>>) -> Self {
        Self {
            service,
            store: Store::new(reducer),
            drag: DragMachine::new(),
            scroller: AutoScroller::default(),
            active_root_zone: None,
            keymap: Keymap::default(),
            status: LoadStatus::Idle,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    pub fn state(&self) -> &EditorState {
        self.store.state()
    }

    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        self.store.registry()
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Load a page by id or slug and make it the edited document
    pub async fn open(&mut self, page_id: &str) -> Result<()> {
        self.status = LoadStatus::Loading;
        self.drag = DragMachine::new();
        self.scroller.stop();
        self.active_root_zone = None;
        info!(page_id, "Opening page");

        match self.service.resolve(page_id).await {
            Ok(Some(page)) => {
                self.store.dispatch(Action::SetPage { page });
                self.status = LoadStatus::Ready;
                self.revalidate();
                info!(
                    page_id,
                    errors = self.state().validation_errors.len(),
                    "Page ready"
                );
                Ok(())
            }
            Ok(None) => {
                warn!(page_id, "Page not found");
                self.status = LoadStatus::Failed(format!("Page not found: {}", page_id));
                Err(ShellError::PageNotFound(page_id.to_string()))
            }
            Err(e) => {
                warn!(page_id, error = %e, "Page failed to load");
                self.status = LoadStatus::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Apply an action; document changes are re-validated
    pub fn dispatch(&mut self, action: Action) -> DispatchOutcome {
        if !self.is_ready() {
            debug!(action = action.name(), "Ignoring action, no page loaded");
            return DispatchOutcome::Rejected;
        }
        let changes_document = action.changes_document();
        let outcome = self.store.dispatch(action);
        if outcome.is_applied() && changes_document {
            self.revalidate();
        }
        outcome
    }

    fn revalidate(&mut self) {
        let errors = match &self.store.state().page {
            Some(page) => validate_page(self.store.registry(), page),
            None => Vec::new(),
        };
        if errors != self.store.state().validation_errors {
            debug!(count = errors.len(), "Validation errors changed");
            self.store.dispatch(Action::SetValidationErrors { errors });
        }
    }

    /// Persist the current page, bumping its version
    pub async fn save(&mut self) -> Result<PageDocument> {
        if !self.is_ready() {
            return Err(ShellError::NotReady);
        }
        let state = self.store.state();
        if state.is_saving {
            return Err(ShellError::AlreadySaving);
        }
        if state.has_validation_errors() {
            return Err(ShellError::ValidationBlocked(state.validation_errors.len()));
        }
        if !state.has_unsaved_changes {
            return Err(ShellError::NothingToSave);
        }
        let page = state.page.clone().ok_or(ShellError::NotReady)?;

        self.store.dispatch(Action::SetSaving { saving: true });
        match self.service.save_page(&page, true).await {
            Ok(saved) => {
                self.store.dispatch(Action::SaveSucceeded {
                    updated_at: saved.updated_at,
                    version: saved.version,
                });
                info!(id = %saved.id, version = saved.version, "Page saved");
                Ok(saved)
            }
            Err(e) => {
                self.store.dispatch(Action::SaveFailed);
                warn!(id = %page.id, error = %e, "Save failed");
                Err(e.into())
            }
        }
    }

    pub fn request_exit(&self) -> ExitDecision {
        if self.state().has_unsaved_changes {
            ExitDecision::ConfirmDiscard
        } else {
            ExitDecision::Exit
        }
    }

    pub fn handle_key(&mut self, chord: &KeyChord) -> KeyOutcome {
        match self.keymap.lookup(chord) {
            Some(command) => self.run_command(command),
            None => KeyOutcome::Ignored,
        }
    }

    pub fn run_command(&mut self, command: Command) -> KeyOutcome {
        if !self.is_ready() {
            return KeyOutcome::Ignored;
        }
        let state = self.store.state();
        if state.preview_mode && !command.allowed_in_preview() {
            return KeyOutcome::Ignored;
        }
        if state.renaming_component_id.is_some() && command != Command::Escape {
            return KeyOutcome::Ignored;
        }

        let selected = state.selected_component_id.clone();
        let action = match command {
            Command::Undo => Some(Action::Undo),
            Command::Redo => Some(Action::Redo),
            Command::Copy => selected.map(|id| Action::Copy { id }),
            Command::Cut => selected.map(|id| Action::Cut { id }),
            Command::Duplicate => selected.map(|id| Action::Duplicate { id }),
            Command::Delete => selected.map(|id| Action::RemoveComponent { id }),
            Command::Rename => selected.map(|id| Action::StartRename { id }),
            Command::Paste => paste_position(state, self.store.registry(), selected.as_deref())
                .map(|(parent_id, index)| Action::Paste { parent_id, index }),
            Command::TogglePreview => Some(Action::TogglePreview),
            Command::Save => return KeyOutcome::SaveRequested,
            Command::Escape => return self.escape(),
        };

        match action {
            Some(action) => self.dispatch(action).into(),
            None => KeyOutcome::Ignored,
        }
    }

    /// Escape unwinds one level: drag, rename, menu, then selection
    fn escape(&mut self) -> KeyOutcome {
        if self.drag.is_active() {
            self.cancel_drag();
            return KeyOutcome::Applied;
        }
        let state = self.store.state();
        let action = if state.renaming_component_id.is_some() {
            Action::StopRename
        } else if state.context_menu.open {
            Action::CloseContextMenu
        } else if state.selected_component_id.is_some() {
            Action::Select { id: None }
        } else {
            return KeyOutcome::Ignored;
        };
        self.dispatch(action).into()
    }

    /// Abort the current drag without touching the document
    pub fn cancel_drag(&mut self) {
        if let Some(page) = &self.store.state().page {
            self.drag.handle(DragEvent::Cancel, page, self.store.registry());
        }
        debug!("Drag cancelled");
        self.finish_drag();
    }

    fn finish_drag(&mut self) {
        self.scroller.stop();
        self.active_root_zone = None;
        if self.store.state().is_dragging {
            self.store.dispatch(Action::EndDrag);
        }
    }

    /// Route a canvas pointer event
    pub fn handle_canvas_event(&mut self, event: CanvasEvent) -> DispatchOutcome {
        if !self.is_ready() || self.store.state().preview_mode {
            return DispatchOutcome::Rejected;
        }

        match event {
            CanvasEvent::Click { component_id } => {
                if self.state().context_menu.open {
                    self.dispatch(Action::CloseContextMenu);
                }
                self.dispatch(Action::Select {
                    id: Some(component_id),
                })
            }
            CanvasEvent::CanvasClick => {
                if self.state().context_menu.open {
                    self.dispatch(Action::CloseContextMenu);
                }
                self.dispatch(Action::Select { id: None })
            }
            CanvasEvent::ContextMenu { component_id, x, y } => self.dispatch(Action::OpenContextMenu {
                x,
                y,
                target_id: component_id,
            }),
            CanvasEvent::Hover { component_id } => self.dispatch(Action::Hover { id: component_id }),
            CanvasEvent::DragStart { source } => {
                self.drag_event(DragEvent::Start(source.clone()));
                if !self.drag.is_active() {
                    return DispatchOutcome::Rejected;
                }
                let component_type = match source {
                    DragSource::New { component_type } => Some(component_type),
                    DragSource::Existing { .. } => None,
                };
                self.dispatch(Action::StartDrag { component_type })
            }
            CanvasEvent::DragOver {
                component_id,
                rect,
                pointer_y,
                viewport,
            } => {
                self.drag_event(DragEvent::Over {
                    target_id: component_id,
                    rect,
                    pointer_y,
                });
                self.active_root_zone = None;
                self.track_pointer(pointer_y, viewport)
            }
            CanvasEvent::DragOverRootZone {
                index,
                pointer_y,
                viewport,
            } => {
                self.drag_event(DragEvent::OverRootZone { index });
                self.active_root_zone = self
                    .drag
                    .state()
                    .target()
                    .filter(|target| target.target_id.is_none())
                    .map(|_| index);
                self.track_pointer(pointer_y, viewport)
            }
            CanvasEvent::DragLeave { component_id } => {
                if component_id.is_none() {
                    self.active_root_zone = None;
                }
                self.drag_event(DragEvent::Leave {
                    target_id: component_id,
                });
                DispatchOutcome::Applied
            }
            CanvasEvent::Drop => {
                let commit = self.drag_event(DragEvent::Drop);
                self.finish_drag();
                match commit {
                    Some(commit) => self.dispatch(commit.into_action()),
                    None => DispatchOutcome::Rejected,
                }
            }
            CanvasEvent::DragEnd => {
                self.drag_event(DragEvent::End);
                self.finish_drag();
                DispatchOutcome::Applied
            }
        }
    }

    fn drag_event(&mut self, event: DragEvent) -> Option<hearth_editor::DropCommit> {
        let page = self.store.state().page.as_ref()?;
        self.drag.handle(event, page, self.store.registry())
    }

    fn track_pointer(&mut self, pointer_y: f64, viewport: Viewport) -> DispatchOutcome {
        if !self.drag.is_active() {
            return DispatchOutcome::Rejected;
        }
        self.scroller.update(pointer_y, viewport);
        DispatchOutcome::Applied
    }

    /// Per-frame scroll delta while a drag sits in an edge zone
    pub fn tick_autoscroll(&mut self) -> Option<f64> {
        if !self.drag.is_active() {
            self.scroller.stop();
            return None;
        }
        self.scroller.tick()
    }

    pub fn render(&self) -> CanvasView {
        let state = self.store.state();
        let Some(page) = &state.page else {
            return CanvasView::default();
        };

        let editing = !state.preview_mode;
        let mode = if editing {
            let drag = self.drag.state();
            RenderMode::Editing(Overlay::from_state(state).with_drag(drag.dragging_id(), drag.target()))
        } else {
            RenderMode::Preview
        };

        let rendered = Renderer::new(self.store.registry(), mode).render_page(page);
        CanvasView {
            nodes: compose_canvas(rendered.nodes, editing, self.active_root_zone),
            errors: rendered.errors,
            editing,
        }
    }

    pub fn header(&self) -> HeaderView {
        HeaderView::from_state(self.state())
    }

    pub fn palette(&self, filter: &str) -> Vec<PaletteGroup> {
        palette_groups(self.store.registry(), filter)
    }

    pub fn add_from_palette(&mut self, component_type: &str) -> DispatchOutcome {
        match click_to_add(self.store.state(), self.store.registry(), component_type) {
            Some(action) => self.dispatch(action),
            None => DispatchOutcome::Rejected,
        }
    }

    pub fn layers(&self) -> Vec<LayerRow> {
        layer_rows(self.state(), self.store.registry())
    }

    pub fn property_form(&self) -> Option<PropertyForm> {
        property_form(self.state(), self.store.registry())
    }

    /// Write raw form input into a prop of the selected component
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<DispatchOutcome> {
        let state = self.store.state();
        let instance = state.selected_component().ok_or(ShellError::NoSelection)?;
        let definition = self
            .store
            .registry()
            .get(&instance.component_type)
            .and_then(|entry| entry.props_schema.get(name))
            .ok_or_else(|| ShellError::InvalidField {
                field: name.to_string(),
                message: "not a property of this component".to_string(),
            })?;
        let value = parse_field_input(definition, raw)?;
        let action = update_field(&instance.id, name, value);
        Ok(self.dispatch(action))
    }

    pub fn context_menu(&self) -> Vec<MenuItem> {
        context_menu_items(self.state(), self.store.registry(), &self.keymap)
    }

    /// Run a context menu command against the menu's target, then close it
    pub fn run_menu_command(&mut self, command: MenuCommand) -> DispatchOutcome {
        let target = self.state().context_menu.target_id.clone();
        let action = command_action(command, self.state(), self.store.registry(), target.as_deref());
        if self.state().context_menu.open {
            self.dispatch(Action::CloseContextMenu);
        }
        match action {
            Some(action) => self.dispatch(action),
            None => DispatchOutcome::Rejected,
        }
    }
}
