//! Dynamic Metadata Applier: best-effort overlay of runtime per-field
//! overrides onto the generated trees.
//!
//! Overrides are decoded once into a closed set of kinds; unrecognized or
//! malformed entries are ignored explicitly. The overlay is a pure
//! overwrite — applying the same metadata twice is a no-op the second time.

use crate::adapters::rules;
use crate::domain::{
    DynamicMetadata, FormDescriptor, SchemaObject, StaticRuleAnnotation, UiElement,
};
use serde_json::Value;
use tracing::warn;

/// A recognized override kind, decoded from the loosely-typed payload.
enum FieldOverride {
    EnumValues(Vec<String>),
    /// Display names for enum values: accepted in the payload, no output
    /// effect.
    EnumNames,
    Label(String),
    Description(String),
    Rule(StaticRuleAnnotation),
    /// Dynamic-section item list; consumed during generation, not here.
    DynamicData,
}

fn decode(key: &str, value: &Value) -> Option<FieldOverride> {
    match key {
        "enum" => string_list(value).map(FieldOverride::EnumValues),
        "enumNames" => value.as_array().map(|_| FieldOverride::EnumNames),
        "label" => value
            .as_str()
            .map(|text| FieldOverride::Label(text.to_string())),
        "description" => value
            .as_str()
            .map(|text| FieldOverride::Description(text.to_string())),
        "rule" => rules::parse_rule_spec(value).map(FieldOverride::Rule),
        "data" => Some(FieldOverride::DynamicData),
        _ => None,
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|entry| entry.as_str().map(str::to_string))
        .collect()
}

/// Overlay `dynamic` onto the generated trees. Only root-level leaf
/// properties are targeted; entries naming anything else are no-ops.
/// Overlay rules are rooted at the document root scope and coerced against
/// the root type.
pub(crate) fn apply(
    schema: &mut SchemaObject,
    uischema: &mut UiElement,
    dynamic: &DynamicMetadata,
    root: &FormDescriptor,
) {
    for (field_name, overrides) in dynamic {
        let Some(property) = schema
            .properties
            .get_mut(field_name)
            .and_then(|node| node.as_property_mut())
        else {
            continue;
        };
        let scope = format!("#/properties/{}", field_name);

        for (key, value) in overrides {
            let Some(decoded) = decode(key, value) else {
                warn!(field = %field_name, key = %key, "unrecognized or malformed override; ignoring");
                continue;
            };
            match decoded {
                FieldOverride::EnumValues(values) => {
                    property.enum_values = Some(values);
                }
                FieldOverride::Label(label) => {
                    property.title = Some(label.clone());
                    if let Some(UiElement::Control { label: control_label, .. }) =
                        uischema.find_control_mut(&scope)
                    {
                        *control_label = Some(label);
                    }
                }
                FieldOverride::Description(description) => {
                    property.description = Some(description);
                }
                FieldOverride::Rule(spec) => {
                    if let Some(UiElement::Control { rule, .. }) =
                        uischema.find_control_mut(&scope)
                    {
                        *rule = Some(rules::resolve(
                            spec.effect,
                            &spec.condition_field,
                            &spec.expected_value,
                            "#/properties/",
                            root,
                        ));
                    }
                }
                FieldOverride::EnumNames | FieldOverride::DynamicData => {}
            }
        }
    }
}
