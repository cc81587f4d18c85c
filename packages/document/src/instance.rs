use crate::IdGenerator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open key-value bag of component properties.
///
/// Shape is described by the registry schema for the component type, but is
/// not enforced at deserialization time.
pub type Props = Map<String, Value>;

/// One node of a page's component tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    /// Unique across the whole document tree
    pub id: String,

    /// Registry key
    pub component_type: String,

    /// User-assigned display override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub props: Props,

    /// Present only for types that accept children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentInstance>>,

    /// Sibling position
    #[serde(default)]
    pub order: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl ComponentInstance {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            name: None,
            props: Props::new(),
            children: None,
            order: 0,
            locked: None,
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<ComponentInstance>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked.then_some(true);
        self
    }

    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.locked.unwrap_or(false)
    }

    pub fn children(&self) -> &[ComponentInstance] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Label shown in layer trees: the name override, else the given fallback
    pub fn label<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => fallback,
        }
    }

    /// Children sorted by `order` (stable, array position breaks ties)
    pub fn ordered_children(&self) -> Vec<&ComponentInstance> {
        let mut children: Vec<&ComponentInstance> = self.children().iter().collect();
        children.sort_by_key(|c| c.order);
        children
    }
}

/// Create a fresh instance of `component_type`.
///
/// Children are initialized to an empty list only when the type accepts
/// children; callers take that flag from the registry entry.
pub fn create_component_instance(
    ids: &mut dyn IdGenerator,
    component_type: impl Into<String>,
    props: Props,
    order: i64,
    accepts_children: bool,
) -> ComponentInstance {
    ComponentInstance {
        id: ids.new_id(),
        component_type: component_type.into(),
        name: None,
        props,
        children: accepts_children.then(Vec::new),
        order,
        locked: None,
    }
}
