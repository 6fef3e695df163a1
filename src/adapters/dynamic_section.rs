//! Dynamic Section Expander: instantiates one schema/UI subtree per
//! runtime-supplied item from a template type.
//!
//! Each item is structurally isolated — a rule override on one item never
//! leaks into another item's subtree. Missing key/label values degrade to
//! the literal text "null" instead of failing the generation.

use crate::adapters::generator::{value_text, BuildContext, BuiltFields, FormGenerator};
use crate::adapters::rules;
use crate::domain::{
    DynamicSectionAnnotation, FieldDescriptor, SchemaNode, SchemaObject, StaticRuleAnnotation,
    UiElement,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Reserved item key carrying per-item rule overrides.
const FIELD_RULES_KEY: &str = "fieldRules";

/// Expand `field` into one subtree per item found in the runtime metadata
/// under the placeholder's name. Items are processed in list order.
pub(crate) fn expand(
    generator: &FormGenerator,
    field: &FieldDescriptor,
    section: &DynamicSectionAnnotation,
    scope_prefix: &str,
    context: BuildContext<'_>,
    out: &mut BuiltFields,
) {
    let Some(template) = generator.provider().descriptor(&section.item_type) else {
        warn!(
            field = %field.name,
            item_type = %section.item_type,
            "dynamic section references an unregistered template type; skipping"
        );
        return;
    };

    let items = match context
        .dynamic
        .get(&field.name)
        .and_then(|entry| entry.get("data"))
    {
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!(
                field = %field.name,
                "dynamic section data is not a list; skipping"
            );
            return;
        }
        None => return,
    };

    for item in items {
        let Some(item_data) = item.as_object() else {
            warn!(field = %field.name, "dynamic section item is not an object; skipping");
            continue;
        };

        let item_key = format!(
            "{}{}",
            section.key_prefix,
            value_text(item_data.get(&section.key_field))
        );
        let item_label = value_text(item_data.get(&section.label_field));

        let item_rules = parse_field_rules(item_data.get(FIELD_RULES_KEY));
        let item_context = BuildContext {
            dynamic: context.dynamic,
            item_rules: Some(&item_rules),
        };

        let item_prefix = format!("{}{}/properties/", scope_prefix, item_key);
        let inner = generator.build_type(
            &template,
            template.layout.as_deref(),
            &item_prefix,
            item_context,
        );

        let mut object = SchemaObject::new(Some(item_label.clone()), None);
        object.properties = inner.properties;
        object.set_required(inner.required);
        out.properties.insert(item_key, SchemaNode::Object(object));
        out.elements.push(UiElement::Group {
            label: Some(item_label),
            elements: inner.elements,
        });
    }
}

/// Decode an item's `fieldRules` map. Malformed entries are dropped with a
/// diagnostic; the rest of the item still renders.
fn parse_field_rules(value: Option<&Value>) -> HashMap<String, StaticRuleAnnotation> {
    let mut parsed = HashMap::new();
    let Some(Value::Object(entries)) = value else {
        return parsed;
    };
    for (field_name, spec) in entries {
        match rules::parse_rule_spec(spec) {
            Some(rule) => {
                parsed.insert(field_name.clone(), rule);
            }
            None => {
                warn!(field = %field_name, "malformed fieldRules entry; ignoring");
            }
        }
    }
    parsed
}
