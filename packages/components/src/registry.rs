//! # Component Registry
//!
//! Immutable catalog of component types. Built once at startup through
//! [`RegistryBuilder`] and passed explicitly (usually as
//! `Arc<ComponentRegistry>`) to the editor, renderer and shell.

use crate::schema::PropDefinition;
use crate::vdom::VNode;
use hearth_document::Props;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Layout,
    Content,
    Navigation,
    Interactive,
    Form,
    Business,
    Utility,
}

impl Category {
    /// Display order used by palettes
    pub const ALL: [Category; 7] = [
        Category::Layout,
        Category::Content,
        Category::Navigation,
        Category::Interactive,
        Category::Form,
        Category::Business,
        Category::Utility,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Layout => "Layout",
            Category::Content => "Content",
            Category::Navigation => "Navigation",
            Category::Interactive => "Interactive",
            Category::Form => "Form",
            Category::Business => "Business",
            Category::Utility => "Utility",
        }
    }

    fn rank(&self) -> usize {
        Category::ALL.iter().position(|c| c == self).unwrap_or(usize::MAX)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error("Invalid prop '{prop}': {message}")]
    InvalidProp { prop: String, message: String },

    #[error("Render failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Component type already registered: {0}")]
    Duplicate(String),

    #[error("Component type must not be empty")]
    EmptyType,
}

/// Renderable implementation of a component type
pub trait ComponentView: Send + Sync {
    fn render(&self, props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError>;
}

impl<F> ComponentView for F
where
    F: Fn(&Props, Vec<VNode>) -> Result<VNode, ViewError> + Send + Sync,
{
    fn render(&self, props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
        self(props, children)
    }
}

/// Static description of a component type
#[derive(Clone)]
pub struct RegistryEntry {
    pub component_type: String,
    pub display_name: String,
    pub category: Category,
    pub icon: String,
    pub description: String,
    pub accepts_children: bool,
    /// When set, only these types may be inserted as children
    pub allowed_children: Option<Vec<String>>,
    /// Declaration order is preserved for form generation
    pub props_schema: IndexMap<String, PropDefinition>,
    pub default_props: Props,
    /// Must wrap an existing component; never added standalone
    pub is_modifier: bool,
    pub view: Arc<dyn ComponentView>,
}

impl RegistryEntry {
    pub fn new(
        component_type: impl Into<String>,
        category: Category,
        view: impl ComponentView + 'static,
    ) -> Self {
        let component_type = component_type.into();
        Self {
            display_name: component_type.clone(),
            component_type,
            category,
            icon: "square".to_string(),
            description: String::new(),
            accepts_children: false,
            allowed_children: None,
            props_schema: IndexMap::new(),
            default_props: Props::new(),
            is_modifier: false,
            view: Arc::new(view),
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn container(mut self) -> Self {
        self.accepts_children = true;
        self
    }

    pub fn allow_children(mut self, types: &[&str]) -> Self {
        self.accepts_children = true;
        self.allowed_children = Some(types.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn modifier(mut self) -> Self {
        self.is_modifier = true;
        self.accepts_children = true;
        self
    }

    /// Declare a prop; its default (if any) also becomes a default prop
    pub fn prop(mut self, name: impl Into<String>, definition: PropDefinition) -> Self {
        let name = name.into();
        if let Some(default) = &definition.default {
            self.default_props.insert(name.clone(), default.clone());
        }
        self.props_schema.insert(name, definition);
        self
    }

    /// Fresh props for a new instance: a deep copy of the defaults
    pub fn instantiate_props(&self) -> Props {
        self.default_props.clone()
    }

    pub fn accepts_child(&self, child_type: &str) -> bool {
        self.accepts_children
            && self
                .allowed_children
                .as_ref()
                .map_or(true, |allowed| allowed.iter().any(|t| t == child_type))
    }

    pub fn required_props(&self) -> impl Iterator<Item = (&String, &PropDefinition)> {
        self.props_schema.iter().filter(|(_, def)| def.required)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("component_type", &self.component_type)
            .field("category", &self.category)
            .field("accepts_children", &self.accepts_children)
            .field("is_modifier", &self.is_modifier)
            .field("props", &self.props_schema.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects entries before freezing them into a [`ComponentRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    entries: IndexMap<String, RegistryEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: RegistryEntry) -> Result<&mut Self, RegistryError> {
        if entry.component_type.trim().is_empty() {
            return Err(RegistryError::EmptyType);
        }
        if self.entries.contains_key(&entry.component_type) {
            return Err(RegistryError::Duplicate(entry.component_type));
        }
        self.entries.insert(entry.component_type.clone(), entry);
        Ok(self)
    }

    pub fn build(self) -> ComponentRegistry {
        tracing::debug!(entries = self.entries.len(), "Component registry built");
        ComponentRegistry {
            entries: self.entries,
        }
    }
}

/// Read-only lookup table of component types
pub struct ComponentRegistry {
    entries: IndexMap<String, RegistryEntry>,
}

impl ComponentRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, component_type: &str) -> Option<&RegistryEntry> {
        self.entries.get(component_type)
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.entries.contains_key(component_type)
    }

    /// All entries in registration order
    pub fn get_all(&self) -> Vec<&RegistryEntry> {
        self.entries.values().collect()
    }

    pub fn get_by_category(&self, category: Category) -> Vec<&RegistryEntry> {
        self.entries
            .values()
            .filter(|entry| entry.category == category)
            .collect()
    }

    /// Distinct categories present, in display order
    pub fn get_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for entry in self.entries.values() {
            if !categories.contains(&entry.category) {
                categories.push(entry.category);
            }
        }
        categories.sort_by_key(Category::rank);
        categories
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("entries", &format!("{} entries", self.entries.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropDefinition;
    use serde_json::json;

    fn noop(_: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
        Ok(VNode::element("div").with_children(children))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut builder = ComponentRegistry::builder();
        builder
            .register(
                RegistryEntry::new("Title", Category::Content, noop)
                    .prop("text", PropDefinition::string("Text").with_default("Hello")),
            )
            .unwrap();
        let registry = builder.build();

        let entry = registry.get("Title").unwrap();
        assert_eq!(entry.default_props["text"], json!("Hello"));
        assert!(registry.get("Nope").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut builder = ComponentRegistry::builder();
        builder
            .register(RegistryEntry::new("Title", Category::Content, noop))
            .unwrap();
        let result = builder
            .register(RegistryEntry::new("Title", Category::Layout, noop))
            .map(|_| ());
        assert_eq!(result, Err(RegistryError::Duplicate("Title".to_string())));
    }

    #[test]
    fn test_categories_in_display_order() {
        let mut builder = ComponentRegistry::builder();
        builder
            .register(RegistryEntry::new("Spacer", Category::Utility, noop))
            .unwrap()
            .register(RegistryEntry::new("Title", Category::Content, noop))
            .unwrap()
            .register(RegistryEntry::new("Section", Category::Layout, noop))
            .unwrap()
            .register(RegistryEntry::new("Paragraph", Category::Content, noop))
            .unwrap();
        let registry = builder.build();

        assert_eq!(
            registry.get_categories(),
            vec![Category::Layout, Category::Content, Category::Utility]
        );
        assert_eq!(registry.get_by_category(Category::Content).len(), 2);
    }

    #[test]
    fn test_allowed_children() {
        let entry = RegistryEntry::new("Accordion", Category::Interactive, noop)
            .allow_children(&["AccordionItem"]);
        assert!(entry.accepts_child("AccordionItem"));
        assert!(!entry.accepts_child("Title"));

        let leaf = RegistryEntry::new("Title", Category::Content, noop);
        assert!(!leaf.accepts_child("Title"));
    }
}
