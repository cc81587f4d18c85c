//! Built-in bakery component library

mod business;
mod content;
mod interactive;
mod layout;
mod navigation;
mod utility;

use crate::registry::{ComponentRegistry, RegistryEntry, RegistryError};
use hearth_document::Props;
use serde_json::Value;

pub use layout::{format_ratio, parse_ratio};

/// Every built-in entry, in palette order
pub fn bakery_entries() -> Vec<RegistryEntry> {
    let mut entries = Vec::new();
    entries.extend(layout::entries());
    entries.extend(content::entries());
    entries.extend(navigation::entries());
    entries.extend(interactive::entries());
    entries.extend(business::entries());
    entries.extend(utility::entries());
    entries
}

/// Registry containing the built-in bakery component library
pub fn bakery_registry() -> ComponentRegistry {
    try_bakery_registry().unwrap_or_else(|err| {
        tracing::error!(error = %err, "Built-in component library failed to register");
        ComponentRegistry::empty()
    })
}

pub fn try_bakery_registry() -> Result<ComponentRegistry, RegistryError> {
    let mut builder = ComponentRegistry::builder();
    for entry in bakery_entries() {
        builder.register(entry)?;
    }
    Ok(builder.build())
}

pub(crate) fn str_prop<'a>(props: &'a Props, key: &str) -> Option<&'a str> {
    props.get(key).and_then(Value::as_str)
}

pub(crate) fn str_or<'a>(props: &'a Props, key: &str, fallback: &'a str) -> &'a str {
    str_prop(props, key).unwrap_or(fallback)
}

pub(crate) fn num_prop(props: &Props, key: &str) -> Option<f64> {
    props.get(key).and_then(Value::as_f64)
}

pub(crate) fn bool_prop(props: &Props, key: &str) -> bool {
    props.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn array_prop<'a>(props: &'a Props, key: &str) -> &'a [Value] {
    props
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Category;
    use serde_json::json;

    #[test]
    fn test_bakery_registry_builds() {
        let registry = try_bakery_registry().unwrap();
        assert!(registry.len() >= 20);
        assert_eq!(registry.get_categories(), Category::ALL.to_vec());
    }

    #[test]
    fn test_every_required_prop_has_default() {
        // new instances must validate cleanly
        let registry = bakery_registry();
        for entry in registry.get_all() {
            for (name, _) in entry.required_props() {
                assert!(
                    entry.default_props.contains_key(name),
                    "{}.{} is required but has no default",
                    entry.component_type,
                    name
                );
            }
        }
    }

    #[test]
    fn test_every_view_renders_defaults() {
        let registry = bakery_registry();
        for entry in registry.get_all() {
            let node = entry.view.render(&entry.instantiate_props(), vec![]);
            assert!(node.is_ok(), "{} failed to render", entry.component_type);
        }
    }

    #[test]
    fn test_modifiers_flagged() {
        let registry = bakery_registry();
        let modifiers: Vec<&str> = registry
            .get_all()
            .into_iter()
            .filter(|e| e.is_modifier)
            .map(|e| e.component_type.as_str())
            .collect();
        assert_eq!(modifiers, vec!["Animate", "LinkWrapper"]);
    }

    #[test]
    fn test_prop_helpers() {
        let mut props = Props::new();
        props.insert("a".into(), json!("x"));
        props.insert("n".into(), json!(3));
        props.insert("b".into(), json!(true));
        props.insert("list".into(), json!([1, 2]));

        assert_eq!(str_or(&props, "a", "d"), "x");
        assert_eq!(str_or(&props, "missing", "d"), "d");
        assert_eq!(num_prop(&props, "n"), Some(3.0));
        assert!(bool_prop(&props, "b"));
        assert_eq!(array_prop(&props, "list").len(), 2);
        assert!(array_prop(&props, "a").is_empty());
    }
}
