//! Form descriptors: the statically-declared description of a form type.
//!
//! A descriptor is a data-only account of a type's fields, groups, layout
//! and rules. The generator consumes descriptors exclusively; where they
//! come from (config files, a builder in tests) is the registry's concern.

use serde::{Deserialize, Serialize};

/// Declared value type of a field. Determines the JSON schema `type` of the
/// generated leaf property and how rule expected-values are coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
    Enum,
    Object,
}

impl ValueType {
    /// JSON schema type string for this value type. Enumerated values are
    /// represented as strings with the allowed values listed under `enum`.
    pub fn json_type(&self) -> &'static str {
        match self {
            ValueType::String | ValueType::Enum => "string",
            ValueType::Integer => "integer",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Object => "object",
        }
    }
}

/// Kind of UI control to render for a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    #[default]
    Control,
    TextArea,
    DatePicker,
}

/// Field-level metadata for a leaf form control. Carries both schema-facing
/// constraints (format, lengths, pattern) and UI-facing hints (label, kind,
/// free-form options).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlAnnotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub kind: ControlKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Statically-declared allowed values for enum-typed fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Free-form JSON text merged into the Control's `options` map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

/// Marks a field as a nested group of fields from another registered type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAnnotation {
    pub label: String,
    /// Name of the registered descriptor providing the group's fields.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Layout for the fields inside the group. The referenced type's own
    /// layout is not consulted here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<LayoutItem>>,
}

/// Marks a placeholder field to be expanded into one subtree per
/// runtime-supplied item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicSectionAnnotation {
    /// Name of the registered descriptor acting as the per-item template.
    pub item_type: String,
    /// Item key that supplies the unique property name for each subtree.
    pub key_field: String,
    /// Item key that supplies the human-readable label for each subtree.
    pub label_field: String,
    /// Prefix prepended to generated property keys to avoid collisions.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key_prefix: String,
}

/// Effect of a conditional visibility/enablement rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleEffect {
    Show,
    Hide,
    Enable,
    Disable,
}

/// A statically-declared rule: only meaningful on a field that also carries
/// a control annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticRuleAnnotation {
    pub effect: RuleEffect,
    /// Name of the sibling field whose value is tested.
    pub condition_field: String,
    /// Expected value as text; coerced to the condition field's declared type.
    pub expected_value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

/// One container in a declarative layout: an orientation plus the field
/// names it claims. A field name may appear in at most one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutItem {
    #[serde(default)]
    pub orientation: Orientation,
    pub fields: Vec<String>,
}

/// A single field of a form type. The control/group/dynamic annotations are
/// mutually exclusive; a field carrying none of them is not part of the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<ControlAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicSectionAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<StaticRuleAnnotation>,
}

impl FieldDescriptor {
    /// Convenience constructor for a plain control field, used heavily in
    /// tests and programmatic registration.
    pub fn control(name: &str, value_type: ValueType, annotation: ControlAnnotation) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            control: Some(annotation),
            group: None,
            dynamic: None,
            rule: None,
        }
    }
}

/// Type-level descriptor: title, description, declarative layout and the
/// ordered field list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDescriptor {
    /// Unique type identifier used by `generate`, group references and
    /// dynamic-section templates.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<LayoutItem>>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    /// Look up a field by name, in declaration order.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}
