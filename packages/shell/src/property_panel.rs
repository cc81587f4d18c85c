//! Schema-driven property form for the selected component.

use crate::errors::{Result, ShellError};
use hearth_components::{
    format_ratio, parse_ratio, ComponentRegistry, EditorHint, PropDefinition, PropKind,
    SelectOption,
};
use hearth_document::{ComponentInstance, Props};
use hearth_editor::{Action, EditorState};
use serde::Serialize;
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "camelCase")]
pub enum FieldControl {
    Text {
        max_length: Option<usize>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Checkbox,
    Select {
        options: Vec<SelectOption>,
    },
    Color,
    ImagePath,
    /// Proportions of a flexible row, one weight per child
    Ratio {
        weights: Vec<u32>,
        child_count: usize,
    },
    /// Lists and objects edited as raw JSON
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub required: bool,
    pub control: FieldControl,
    /// Current value, falling back to the schema default
    pub value: Value,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyForm {
    pub component_id: String,
    pub component_type: String,
    pub title: String,
    pub locked: bool,
    pub fields: Vec<FormField>,
}

/// Form for the selected component, or `None` when nothing editable is selected
pub fn property_form(state: &EditorState, registry: &ComponentRegistry) -> Option<PropertyForm> {
    let instance = state.selected_component()?;
    let entry = registry.get(&instance.component_type)?;

    let fields = entry
        .props_schema
        .iter()
        .filter(|(_, definition)| definition.is_visible(&instance.props, &entry.default_props))
        .map(|(name, definition)| {
            let error = state
                .errors_for(&instance.id)
                .into_iter()
                .find(|e| &e.field == name)
                .map(|e| e.message.clone());
            FormField {
                name: name.clone(),
                label: definition.label.clone(),
                description: definition.description.clone(),
                required: definition.required,
                control: control_for(definition, instance, name),
                value: instance
                    .props
                    .get(name)
                    .or(definition.default.as_ref())
                    .cloned()
                    .unwrap_or(Value::Null),
                error,
            }
        })
        .collect();

    Some(PropertyForm {
        component_id: instance.id.clone(),
        component_type: instance.component_type.clone(),
        title: instance.label(&entry.display_name).to_string(),
        locked: instance.is_locked(),
        fields,
    })
}

fn control_for(definition: &PropDefinition, instance: &ComponentInstance, name: &str) -> FieldControl {
    if definition.editor == Some(EditorHint::Ratio) {
        let child_count = instance.children().len();
        let current = instance
            .props
            .get(name)
            .or(definition.default.as_ref())
            .and_then(Value::as_str)
            .unwrap_or("");
        let weights = parse_ratio(&rebalance_ratio(current, child_count)).unwrap_or_default();
        return FieldControl::Ratio {
            weights,
            child_count,
        };
    }

    match definition.kind {
        PropKind::Number => FieldControl::Number {
            min: definition.constraints.min,
            max: definition.constraints.max,
            step: definition.constraints.step,
        },
        PropKind::Boolean => FieldControl::Checkbox,
        PropKind::Select => FieldControl::Select {
            options: definition.options.clone(),
        },
        PropKind::Color => FieldControl::Color,
        PropKind::Image => FieldControl::ImagePath,
        PropKind::Array | PropKind::Object => FieldControl::Json,
        PropKind::String | PropKind::Icon | PropKind::Dimension => FieldControl::Text {
            max_length: definition.constraints.max_length,
        },
    }
}

/// Convert raw form input into the JSON value stored in props
pub fn parse_field_input(definition: &PropDefinition, raw: &str) -> Result<Value> {
    let invalid = |message: String| ShellError::InvalidField {
        field: definition.label.clone(),
        message,
    };

    if definition.editor == Some(EditorHint::Ratio) {
        return parse_ratio(raw)
            .map(|weights| Value::String(format_ratio(&weights)))
            .ok_or_else(|| invalid("must look like 1:2:1".to_string()));
    }

    match definition.kind {
        PropKind::Number => {
            let text = raw.trim();
            if let Ok(int) = text.parse::<i64>() {
                return Ok(Value::from(int));
            }
            text.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid("must be a number".to_string()))
        }
        PropKind::Boolean => match raw.trim().to_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(Value::Bool(true)),
            "false" | "off" | "no" | "0" | "" => Ok(Value::Bool(false)),
            _ => Err(invalid("must be true or false".to_string())),
        },
        PropKind::Select => definition
            .options
            .iter()
            .find(|option| option_matches(option, raw))
            .map(|option| option.value.clone())
            .ok_or_else(|| invalid(format!("has no option {:?}", raw))),
        PropKind::Array | PropKind::Object => {
            let value: Value = serde_json::from_str(raw)
                .map_err(|e| invalid(format!("is not valid JSON: {}", e)))?;
            let shape_ok = match definition.kind {
                PropKind::Array => value.is_array(),
                _ => value.is_object(),
            };
            if shape_ok {
                Ok(value)
            } else {
                Err(invalid("has the wrong shape".to_string()))
            }
        }
        PropKind::String | PropKind::Color | PropKind::Image | PropKind::Icon | PropKind::Dimension => {
            Ok(Value::String(raw.to_string()))
        }
    }
}

fn option_matches(option: &SelectOption, raw: &str) -> bool {
    match &option.value {
        Value::String(value) => value == raw,
        other => other.to_string() == raw,
    }
}

/// Make a ratio string hold exactly one weight per child.
///
/// Missing weights are filled with 1 and extra ones dropped. Unparseable
/// input restarts from equal weights.
pub fn rebalance_ratio(raw: &str, child_count: usize) -> String {
    let target = child_count.max(1);
    let mut weights = parse_ratio(raw).unwrap_or_default();
    weights.truncate(target);
    weights.resize(target, 1);
    format_ratio(&weights)
}

/// Action writing one prop of `component_id`
pub fn update_field(component_id: &str, name: &str, value: Value) -> Action {
    let mut props = Props::new();
    props.insert(name.to_string(), value);
    Action::UpdateComponentProps {
        id: component_id.to_string(),
        props,
    }
}
