use crate::spacing::{apply_spacing, effective_spacing, merge_spacing};
use hearth_components::{ComponentRegistry, DomEvent, VNode, ViewError};
use hearth_document::{ComponentInstance, PageDocument, PageSettings};
use hearth_editor::{DropIntent, DropTarget, EditorState};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Component that could not be rendered; the page still renders around it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Unknown component type '{component_type}' ({component_id})")]
    UnknownComponent {
        component_id: String,
        component_type: String,
    },

    #[error("{component_type} ({component_id}) failed to render: {source}")]
    View {
        component_id: String,
        component_type: String,
        #[source]
        source: ViewError,
    },
}

impl RenderError {
    pub fn component_id(&self) -> &str {
        match self {
            RenderError::UnknownComponent { component_id, .. } => component_id,
            RenderError::View { component_id, .. } => component_id,
        }
    }
}

/// Interaction state shown on top of the page while editing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Overlay {
    pub selected_id: Option<String>,
    pub hovered_id: Option<String>,
    pub dragging_id: Option<String>,
    pub drop_target: Option<DropTarget>,
}

impl Overlay {
    pub fn from_state(state: &EditorState) -> Self {
        Self {
            selected_id: state.selected_component_id.clone(),
            hovered_id: state.hovered_component_id.clone(),
            dragging_id: None,
            drop_target: None,
        }
    }

    pub fn with_drag(mut self, dragging_id: Option<&str>, drop_target: Option<&DropTarget>) -> Self {
        self.dragging_id = dragging_id.map(str::to_string);
        self.drop_target = drop_target.cloned();
        self
    }

    fn is(&self, field: &Option<String>, id: &str) -> bool {
        field.as_deref() == Some(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    /// Bare component output, as visitors see it
    Preview,
    /// Every instance framed with selection and drag/drop affordances
    Editing(Overlay),
}

impl RenderMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, RenderMode::Editing(_))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedPage {
    /// Root nodes in `order`
    pub nodes: Vec<VNode>,
    pub errors: Vec<RenderError>,
}

impl RenderedPage {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct Renderer<'a> {
    registry: &'a ComponentRegistry,
    mode: RenderMode,
}

impl<'a> Renderer<'a> {
    pub fn new(registry: &'a ComponentRegistry, mode: RenderMode) -> Self {
        Self { registry, mode }
    }

    pub fn preview(registry: &'a ComponentRegistry) -> Self {
        Self::new(registry, RenderMode::Preview)
    }

    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    /// Render every root component of `page`
    #[instrument(skip(self, page), fields(page_id = %page.id, editing = self.mode.is_editing()))]
    pub fn render_page(&self, page: &PageDocument) -> RenderedPage {
        let mut errors = Vec::new();
        let nodes = page
            .ordered_components()
            .into_iter()
            .map(|instance| self.render_instance(instance, 0, &page.settings, &mut errors))
            .collect::<Vec<_>>();

        debug!(
            roots = nodes.len(),
            errors = errors.len(),
            "Page rendered"
        );
        RenderedPage { nodes, errors }
    }

    fn render_instance(
        &self,
        instance: &ComponentInstance,
        depth: usize,
        settings: &PageSettings,
        errors: &mut Vec<RenderError>,
    ) -> VNode {
        let children: Vec<VNode> = instance
            .ordered_children()
            .into_iter()
            .map(|child| self.render_instance(child, depth + 1, settings, errors))
            .collect();

        let content = match self.registry.get(&instance.component_type) {
            None => {
                warn!(
                    component_id = %instance.id,
                    component_type = %instance.component_type,
                    "Unknown component type"
                );
                errors.push(RenderError::UnknownComponent {
                    component_id: instance.id.clone(),
                    component_type: instance.component_type.clone(),
                });
                VNode::error(
                    format!("Unknown component: {}", instance.component_type),
                    Some(instance.id.clone()),
                )
            }
            Some(entry) => {
                let spacing = effective_spacing(instance, depth, settings);
                let props = merge_spacing(&instance.props, spacing);
                match entry.view.render(&props, children) {
                    Ok(node) => apply_spacing(node, spacing).with_key(instance.id.clone()),
                    Err(error) => {
                        warn!(
                            component_id = %instance.id,
                            component_type = %instance.component_type,
                            error = %error,
                            "Component failed to render"
                        );
                        errors.push(RenderError::View {
                            component_id: instance.id.clone(),
                            component_type: instance.component_type.clone(),
                            source: error,
                        });
                        VNode::error(
                            format!("{} could not be displayed", entry.display_name),
                            Some(instance.id.clone()),
                        )
                    }
                }
            }
        };

        match &self.mode {
            RenderMode::Preview => content,
            RenderMode::Editing(overlay) => frame(instance, depth, content, overlay),
        }
    }
}

/// Wrap rendered content with the editing affordances for `instance`
fn frame(instance: &ComponentInstance, depth: usize, content: VNode, overlay: &Overlay) -> VNode {
    let id = instance.id.as_str();
    let mut node = VNode::element("div")
        .with_key(format!("frame-{}", id))
        .with_attr("class", "hearth-frame")
        .with_attr("data-component-id", id)
        .with_attr("data-component-type", instance.component_type.as_str())
        .with_attr("data-depth", depth.to_string());

    for (flag, on) in [
        ("data-selected", overlay.is(&overlay.selected_id, id)),
        ("data-hovered", overlay.is(&overlay.hovered_id, id)),
        ("data-dragging", overlay.is(&overlay.dragging_id, id)),
        ("data-locked", instance.is_locked()),
    ] {
        if on {
            node = node.with_attr(flag, "true");
        }
    }

    // Context menu stays available on locked instances so they can be unlocked
    node = node.with_listener(DomEvent::ContextMenu, id);
    if !instance.is_locked() {
        node = node
            .with_attr("draggable", "true")
            .with_listener(DomEvent::Click, id)
            .with_listener(DomEvent::DragStart, id)
            .with_listener(DomEvent::DragEnd, id);
    }
    node = node
        .with_listener(DomEvent::DragOver, id)
        .with_listener(DomEvent::DragLeave, id)
        .with_listener(DomEvent::Drop, id);

    let target = overlay
        .drop_target
        .as_ref()
        .filter(|target| target.target_id.as_deref() == Some(id));

    match target.map(|t| t.intent) {
        Some(DropIntent::Inside) => node.with_attr("data-drop-inside", "true").with_child(content),
        Some(DropIntent::Wrap) => node.with_attr("data-drop-wrap", "true").with_child(content),
        Some(DropIntent::Before) if depth > 0 => node
            .with_child(drop_indicator("before"))
            .with_child(content),
        Some(DropIntent::After) if depth > 0 => node
            .with_child(content)
            .with_child(drop_indicator("after")),
        // Root-level before/after is shown by the canvas strips
        _ => node.with_child(content),
    }
}

fn drop_indicator(position: &str) -> VNode {
    VNode::element("div")
        .with_attr("class", "hearth-drop-indicator")
        .with_attr("data-drop-position", position)
        .with_child(VNode::text("Drop here"))
}
