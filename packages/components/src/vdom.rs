use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        /// Stable identity for sibling reconciliation
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// Interaction hooks the host wires to real event handlers
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        listeners: Vec<Listener>,
    },

    /// Text node
    Text { content: String },

    /// Error placeholder (shows the failure inline instead of failing the page)
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        component_id: Option<String>,
    },
}

/// Pointer events the editor listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomEvent {
    Click,
    ContextMenu,
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

impl DomEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomEvent::Click => "click",
            DomEvent::ContextMenu => "contextmenu",
            DomEvent::DragStart => "dragstart",
            DomEvent::DragEnd => "dragend",
            DomEvent::DragOver => "dragover",
            DomEvent::DragLeave => "dragleave",
            DomEvent::Drop => "drop",
        }
    }
}

/// Binds an event on an element to the component instance it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener {
    pub event: DomEvent,
    pub component_id: String,
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            key: None,
            listeners: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>, component_id: Option<String>) -> Self {
        VNode::Error {
            message: message.into(),
            component_id,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    /// Set a style only when `value` is present and non-empty
    pub fn with_optional_style(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.with_style(key, v),
            _ => self,
        }
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        if let VNode::Element {
            key: ref mut node_key,
            ..
        } = self
        {
            *node_key = Some(key.into());
        }
        self
    }

    pub fn with_listener(mut self, event: DomEvent, component_id: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut listeners, ..
        } = self
        {
            listeners.push(Listener {
                event,
                component_id: component_id.into(),
            });
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn listeners(&self) -> &[Listener] {
        match self {
            VNode::Element { listeners, .. } => listeners,
            _ => &[],
        }
    }

    pub fn has_listener(&self, event: DomEvent) -> bool {
        self.listeners().iter().any(|l| l.event == event)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, VNode::Error { .. })
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Error { message, .. } => message.clone(),
            VNode::Element { children, .. } => {
                children.iter().map(VNode::text_content).collect()
            }
        }
    }

    /// Depth-first search for the first node matching `predicate`
    pub fn find(&self, predicate: &dyn Fn(&VNode) -> bool) -> Option<&VNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(predicate))
    }

    /// All nodes (self included) matching `predicate`, depth-first
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&VNode) -> bool, out: &mut Vec<&'a VNode>) {
        if predicate(self) {
            out.push(self);
        }
        for child in self.children() {
            child.find_all(predicate, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_only_touch_elements() {
        let text = VNode::text("hi").with_attr("class", "x").with_child(VNode::text("y"));
        assert_eq!(text, VNode::text("hi"));

        let el = VNode::element("div")
            .with_attr("class", "card")
            .with_style("padding", "1rem")
            .with_child(VNode::text("hi"))
            .with_listener(DomEvent::Click, "c-1");

        assert_eq!(el.attr("class"), Some("card"));
        assert_eq!(el.style("padding"), Some("1rem"));
        assert_eq!(el.text_content(), "hi");
        assert!(el.has_listener(DomEvent::Click));
        assert!(!el.has_listener(DomEvent::Drop));
    }

    #[test]
    fn test_find_nested() {
        let tree = VNode::element("section").with_child(
            VNode::element("div").with_child(VNode::element("img").with_attr("src", "/bread.jpg")),
        );

        let img = tree.find(&|n| n.tag() == Some("img")).unwrap();
        assert_eq!(img.attr("src"), Some("/bread.jpg"));
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let node = VNode::error("boom", Some("c-1".to_string()));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "Error");
        assert_eq!(json["component_id"], "c-1");
    }
}
