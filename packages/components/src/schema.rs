//! Prop schemas: the advisory description of a component's configurable
//! properties, used to generate property forms and to validate documents.

use hearth_document::Props;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of value a prop holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
    String,
    Number,
    Boolean,
    Select,
    Color,
    Image,
    Array,
    Object,
    Icon,
    Dimension,
}

impl PropKind {
    /// Kinds stored as JSON strings
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            PropKind::String
                | PropKind::Color
                | PropKind::Image
                | PropKind::Icon
                | PropKind::Dimension
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: Value,
}

/// Show a prop only while another prop equals a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleWhen {
    pub prop: String,
    pub equals: Value,
}

/// Specialized editor for a prop, beyond what the kind implies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorHint {
    /// "1:2:1" style proportions of a flexible row
    Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDefinition {
    pub kind: PropKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub constraints: PropConstraints,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<EditorHint>,
}

impl PropDefinition {
    pub fn new(kind: PropKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            default: None,
            required: false,
            description: None,
            constraints: PropConstraints::default(),
            options: Vec::new(),
            visible_when: None,
            editor: None,
        }
    }

    pub fn string(label: impl Into<String>) -> Self {
        Self::new(PropKind::String, label)
    }

    pub fn number(label: impl Into<String>) -> Self {
        Self::new(PropKind::Number, label)
    }

    pub fn boolean(label: impl Into<String>) -> Self {
        Self::new(PropKind::Boolean, label)
    }

    pub fn color(label: impl Into<String>) -> Self {
        Self::new(PropKind::Color, label)
    }

    pub fn image(label: impl Into<String>) -> Self {
        Self::new(PropKind::Image, label)
    }

    pub fn dimension(label: impl Into<String>) -> Self {
        Self::new(PropKind::Dimension, label)
    }

    pub fn array(label: impl Into<String>) -> Self {
        Self::new(PropKind::Array, label)
    }

    pub fn icon(label: impl Into<String>) -> Self {
        Self::new(PropKind::Icon, label)
    }

    /// Select over string options given as `(label, value)` pairs
    pub fn select(label: impl Into<String>, options: &[(&str, &str)]) -> Self {
        let mut def = Self::new(PropKind::Select, label);
        def.options = options
            .iter()
            .map(|(label, value)| SelectOption {
                label: label.to_string(),
                value: Value::String(value.to_string()),
            })
            .collect();
        def
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.constraints.min = Some(min);
        self.constraints.max = Some(max);
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.constraints.step = Some(step);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.constraints.max_length = Some(max_length);
        self
    }

    pub fn visible_when(mut self, prop: impl Into<String>, equals: impl Into<Value>) -> Self {
        self.visible_when = Some(VisibleWhen {
            prop: prop.into(),
            equals: equals.into(),
        });
        self
    }

    pub fn with_editor(mut self, editor: EditorHint) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Whether the prop is shown given the instance's current props.
    ///
    /// A missing controlling prop falls back to `default_props`.
    pub fn is_visible(&self, props: &Props, default_props: &Props) -> bool {
        match &self.visible_when {
            None => true,
            Some(rule) => props
                .get(&rule.prop)
                .or_else(|| default_props.get(&rule.prop))
                .map(|value| value == &rule.equals)
                .unwrap_or(false),
        }
    }

    pub fn allows_option(&self, value: &Value) -> bool {
        self.options.iter().any(|option| &option.value == value)
    }
}
