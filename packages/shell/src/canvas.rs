//! Canvas composition and drag auto-scroll.

use hearth_components::VNode;
use hearth_renderer::RenderError;
use serde::{Deserialize, Serialize};

pub const ROOT_ZONE_CLASS: &str = "hearth-root-drop-zone";

/// Scrollable area of the canvas, in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub top: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// What the canvas shows for one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasView {
    pub nodes: Vec<VNode>,
    pub errors: Vec<RenderError>,
    pub editing: bool,
}

/// Interleave rendered roots with drop strips.
///
/// Strip `i` sits before root `i`; the last strip appends. `active_zone` marks
/// the strip currently under the pointer. An empty page gets a single strip
/// with a hint.
pub fn compose_canvas(roots: Vec<VNode>, editing: bool, active_zone: Option<usize>) -> Vec<VNode> {
    if !editing {
        return roots;
    }

    if roots.is_empty() {
        return vec![root_zone(0, active_zone == Some(0))
            .with_attr("class", format!("{} hearth-empty-canvas", ROOT_ZONE_CLASS))
            .with_child(VNode::text("Drag components here"))];
    }

    let count = roots.len();
    let mut nodes = Vec::with_capacity(count * 2 + 1);
    for (index, root) in roots.into_iter().enumerate() {
        nodes.push(root_zone(index, active_zone == Some(index)));
        nodes.push(root);
    }
    nodes.push(root_zone(count, active_zone == Some(count)));
    nodes
}

fn root_zone(index: usize, active: bool) -> VNode {
    let node = VNode::element("div")
        .with_attr("class", ROOT_ZONE_CLASS)
        .with_attr("data-root-index", index.to_string())
        .with_key(format!("root-zone-{}", index));
    if active {
        node.with_attr("data-active", "true")
    } else {
        node
    }
}

/// Frame-driven scrolling while a drag hovers near the canvas edges.
///
/// Inside the edge zone the speed ramps linearly from zero at the zone's
/// inner boundary to `max_speed` at the edge itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoScroller {
    edge: f64,
    max_speed: f64,
    velocity: Option<f64>,
}

impl Default for AutoScroller {
    fn default() -> Self {
        Self::new(60.0, 12.0)
    }
}

impl AutoScroller {
    /// `edge` in pixels, `max_speed` in pixels per frame
    pub fn new(edge: f64, max_speed: f64) -> Self {
        Self {
            edge: edge.max(1.0),
            max_speed,
            velocity: None,
        }
    }

    /// Recompute the speed for a pointer position
    pub fn update(&mut self, pointer_y: f64, viewport: Viewport) {
        let top_zone = viewport.top + self.edge;
        let bottom_zone = viewport.top + viewport.height - self.edge;

        let speed = if pointer_y < top_zone {
            let depth = (top_zone - pointer_y).min(self.edge);
            -(depth / self.edge) * self.max_speed
        } else if pointer_y > bottom_zone {
            let depth = (pointer_y - bottom_zone).min(self.edge);
            (depth / self.edge) * self.max_speed
        } else {
            0.0
        };

        self.velocity = (speed.abs() > 0.1).then_some(speed);
    }

    /// Scroll delta for this frame, `None` once the loop should stop
    pub fn tick(&self) -> Option<f64> {
        self.velocity
    }

    pub fn stop(&mut self) {
        self.velocity = None;
    }

    pub fn is_active(&self) -> bool {
        self.velocity.is_some()
    }
}
