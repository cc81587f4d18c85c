//! Schema validation of page documents against the component registry.
//!
//! Props stay an open bag at the storage layer; this pass checks them
//! against each type's advisory schema and reports problems as
//! [`ValidationError`]s instead of rejecting the document.

use hearth_components::{parse_ratio, ComponentRegistry, EditorHint, PropDefinition, PropKind};
use hearth_document::{walk_instance, ComponentInstance, PageDocument, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Problem found on one field of one component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub component_id: String,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        component_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            component_id: component_id.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.component_id, self.field, self.message)
    }
}

/// Validate every component of `page`
pub fn validate_page(registry: &ComponentRegistry, page: &PageDocument) -> Vec<ValidationError> {
    let mut validator = Validator::new(registry);
    validator.visit_page(page);
    tracing::debug!(
        page_id = %page.id,
        errors = validator.errors.len(),
        "Page validated"
    );
    validator.errors
}

/// Validate a single subtree (ids are only checked for duplicates within it)
pub fn validate_instance(
    registry: &ComponentRegistry,
    instance: &ComponentInstance,
) -> Vec<ValidationError> {
    let mut validator = Validator::new(registry);
    validator.visit_instance(instance, 0);
    validator.errors
}

struct Validator<'a> {
    registry: &'a ComponentRegistry,
    seen_ids: HashSet<String>,
    errors: Vec<ValidationError>,
}

impl<'a> Validator<'a> {
    fn new(registry: &'a ComponentRegistry) -> Self {
        Self {
            registry,
            seen_ids: HashSet::new(),
            errors: Vec::new(),
        }
    }

    fn report(&mut self, instance: &ComponentInstance, field: &str, message: impl Into<String>) {
        self.errors
            .push(ValidationError::new(&instance.id, field, message));
    }

    fn check_instance(&mut self, instance: &ComponentInstance) {
        if !self.seen_ids.insert(instance.id.clone()) {
            self.report(instance, "id", format!("Duplicate component id '{}'", instance.id));
        }

        let Some(entry) = self.registry.get(&instance.component_type) else {
            self.report(
                instance,
                "componentType",
                format!("Unknown component type '{}'", instance.component_type),
            );
            return;
        };

        for (name, definition) in &entry.props_schema {
            let visible = definition.is_visible(&instance.props, &entry.default_props);
            match instance.props.get(name) {
                Some(value) if !is_blank(value) => {
                    if let Some(message) = check_value(definition, value) {
                        self.report(instance, name, message);
                    }
                }
                _ if definition.required && visible => {
                    self.report(instance, name, format!("{} is required", definition.label));
                }
                _ => {}
            }
        }

        if !entry.accepts_children {
            if !instance.children().is_empty() {
                self.report(
                    instance,
                    "children",
                    format!("{} cannot contain other components", entry.display_name),
                );
            }
            return;
        }

        for child in instance.children() {
            if !entry.accepts_child(&child.component_type) {
                self.report(
                    instance,
                    "children",
                    format!(
                        "{} cannot contain {}",
                        entry.display_name, child.component_type
                    ),
                );
            }
        }
    }
}

impl Visitor for Validator<'_> {
    fn visit_instance(&mut self, instance: &ComponentInstance, depth: usize) {
        self.check_instance(instance);
        walk_instance(self, instance, depth);
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Message describing why `value` does not fit `definition`, if it does not
fn check_value(definition: &PropDefinition, value: &Value) -> Option<String> {
    let kind_ok = match definition.kind {
        PropKind::Number => value.is_number(),
        PropKind::Boolean => value.is_boolean(),
        PropKind::Array => value.is_array(),
        PropKind::Object => value.is_object(),
        PropKind::Select => true,
        kind if kind.is_textual() => value.is_string(),
        _ => true,
    };
    if !kind_ok {
        return Some(format!(
            "{} must be {}",
            definition.label,
            kind_article(definition.kind)
        ));
    }

    if definition.kind == PropKind::Select
        && !definition.options.is_empty()
        && !definition.allows_option(value)
    {
        return Some(format!("{} has an unsupported value {}", definition.label, value));
    }

    if let Some(number) = value.as_f64() {
        let constraints = &definition.constraints;
        if let Some(min) = constraints.min.filter(|min| number < *min) {
            return Some(format!("{} must be at least {}", definition.label, min));
        }
        if let Some(max) = constraints.max.filter(|max| number > *max) {
            return Some(format!("{} must be at most {}", definition.label, max));
        }
    }

    if let Some(text) = value.as_str() {
        if let Some(max_length) = definition.constraints.max_length {
            if text.chars().count() > max_length {
                return Some(format!(
                    "{} must be at most {} characters",
                    definition.label, max_length
                ));
            }
        }
        match definition.kind {
            PropKind::Color if !is_color(text) => {
                return Some(format!("{} is not a valid color", definition.label));
            }
            PropKind::Dimension if !is_dimension(text) => {
                return Some(format!("{} is not a valid size", definition.label));
            }
            _ => {}
        }
        if definition.editor == Some(EditorHint::Ratio) && parse_ratio(text).is_none() {
            return Some(format!(
                "{} must look like 1:2:1 (positive whole numbers)",
                definition.label
            ));
        }
    }

    None
}

fn kind_article(kind: PropKind) -> &'static str {
    match kind {
        PropKind::Number => "a number",
        PropKind::Boolean => "true or false",
        PropKind::Array => "a list",
        PropKind::Object => "an object",
        _ => "text",
    }
}

const NAMED_COLORS: &[&str] = &[
    "transparent",
    "currentcolor",
    "black",
    "white",
    "red",
    "green",
    "blue",
    "yellow",
    "orange",
    "purple",
    "pink",
    "brown",
    "gray",
    "grey",
    "beige",
    "cream",
    "ivory",
    "tan",
    "chocolate",
    "wheat",
    "gold",
    "navy",
    "teal",
    "maroon",
    "olive",
    "silver",
];

/// Hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), a functional notation or a named color
pub fn is_color(text: &str) -> bool {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let lower = text.to_ascii_lowercase();
    let functional = ["rgb(", "rgba(", "hsl(", "hsla("]
        .iter()
        .any(|prefix| lower.starts_with(prefix));
    if functional {
        return lower.ends_with(')');
    }
    NAMED_COLORS.contains(&lower.as_str())
}

const UNITS: &[&str] = &["px", "rem", "em", "%", "vh", "vw", "ch"];

/// Space-separated CSS lengths (`2rem`, `3rem 1rem`, `100%`, `0`, `auto`)
pub fn is_dimension(text: &str) -> bool {
    let mut tokens = text.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return false;
    }
    tokens.all(|token| {
        if token == "auto" || token == "0" {
            return true;
        }
        UNITS.iter().any(|unit| {
            token
                .strip_suffix(unit)
                .map_or(false, |number| !number.is_empty() && number.parse::<f64>().is_ok())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_components::bakery_registry;
    use hearth_document::{create_page, PageDraft, SequentialIds};
    use serde_json::json;

    fn page_with(components: Vec<ComponentInstance>) -> PageDocument {
        let mut ids = SequentialIds::new("p");
        create_page(
            &mut ids,
            PageDraft {
                components: Some(components),
                ..PageDraft::default()
            },
        )
    }

    fn instance_with_defaults(id: &str, component_type: &str) -> ComponentInstance {
        let registry = bakery_registry();
        let entry = registry.get(component_type).unwrap();
        let node = ComponentInstance::new(id, component_type).with_props(entry.instantiate_props());
        if entry.accepts_children {
            node.with_children(vec![])
        } else {
            node
        }
    }

    #[test]
    fn test_defaults_of_every_component_are_valid() {
        let registry = bakery_registry();
        for entry in registry.get_all() {
            let instance = instance_with_defaults("x", &entry.component_type);
            let errors = validate_instance(&registry, &instance);
            assert!(errors.is_empty(), "{}: {:?}", entry.component_type, errors);
        }
    }

    #[test]
    fn test_unknown_type_reported() {
        let registry = bakery_registry();
        let page = page_with(vec![ComponentInstance::new("a", "Marquee")]);
        let errors = validate_page(&registry, &page);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "componentType");
    }

    #[test]
    fn test_required_prop_blank() {
        let registry = bakery_registry();
        let title = instance_with_defaults("t", "Title").with_prop("text", "   ");
        let errors = validate_instance(&registry, &title);
        assert_eq!(errors, vec![ValidationError::new("t", "text", "Text is required")]);
    }

    #[test]
    fn test_kind_and_range_checks() {
        let registry = bakery_registry();
        let grid = instance_with_defaults("g", "Grid").with_prop("columns", json!(9));
        let spacer = instance_with_defaults("s", "Spacer").with_prop("height", json!(true));
        let divider = instance_with_defaults("d", "Divider").with_prop("color", "not-a-color");

        let page = page_with(vec![grid, spacer.with_order(1), divider.with_order(2)]);
        let fields: Vec<(String, String)> = validate_page(&registry, &page)
            .into_iter()
            .map(|e| (e.component_id, e.field))
            .collect();

        assert!(fields.contains(&("g".to_string(), "columns".to_string())));
        assert!(fields.contains(&("s".to_string(), "height".to_string())));
        assert!(fields.contains(&("d".to_string(), "color".to_string())));
    }

    #[test]
    fn test_select_outside_options() {
        let registry = bakery_registry();
        let title = instance_with_defaults("t", "Title").with_prop("level", "h9");
        let errors = validate_instance(&registry, &title);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "level");
    }

    #[test]
    fn test_children_on_leaf_and_disallowed_child() {
        let registry = bakery_registry();
        let leaf = instance_with_defaults("t", "Title")
            .with_children(vec![instance_with_defaults("c", "Spacer")]);
        let accordion = instance_with_defaults("acc", "Accordion")
            .with_children(vec![instance_with_defaults("s", "Spacer")]);

        let page = page_with(vec![leaf, accordion.with_order(1)]);
        let errors = validate_page(&registry, &page);
        let on_children: Vec<&str> = errors
            .iter()
            .filter(|e| e.field == "children")
            .map(|e| e.component_id.as_str())
            .collect();
        assert_eq!(on_children, vec!["t", "acc"]);
    }

    #[test]
    fn test_duplicate_ids_reported() {
        let registry = bakery_registry();
        let page = page_with(vec![
            instance_with_defaults("dup", "Spacer"),
            instance_with_defaults("dup", "Divider").with_order(1),
        ]);
        let errors = validate_page(&registry, &page);
        assert_eq!(errors, vec![ValidationError::new("dup", "id", "Duplicate component id 'dup'")]);
    }

    #[test]
    fn test_color_and_dimension_formats() {
        assert!(is_color("#fff"));
        assert!(is_color("#A1B2C3"));
        assert!(is_color("rgba(0, 0, 0, 0.5)"));
        assert!(is_color("Wheat"));
        assert!(!is_color("#12"));
        assert!(!is_color("blurple"));

        assert!(is_dimension("3rem 1rem"));
        assert!(is_dimension("100%"));
        assert!(is_dimension("auto"));
        assert!(!is_dimension("12"));
        assert!(!is_dimension("rem"));
        assert!(!is_dimension(""));
    }
}
