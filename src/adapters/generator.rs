//! Core form generator: walks a form descriptor and builds the data-schema
//! and UI-schema trees in lock-step.
//!
//! The recursion is value-returning: each level builds its own properties,
//! required-set and UI elements and hands them back to the caller, which
//! merges them explicitly. Nothing is shared between sibling branches.

use crate::adapters::layout::{self, PlacementGroup};
use crate::adapters::{dynamic_section, overlay, rules};
use crate::domain::{
    ControlKind, DescriptorProvider, DynamicMetadata, FieldDescriptor, FormDescriptor,
    FormResponse, LayoutItem, Orientation, SchemaNode, SchemaObject, SchemaProperty,
    StaticRuleAnnotation, UiElement,
};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// The requested root type has no registered descriptor. This is the
    /// only fatal failure; everything else degrades locally.
    #[error("no form descriptor registered for type '{0}'")]
    UnknownType(String),
}

/// Per-call context threaded through the recursive walk.
#[derive(Clone, Copy)]
pub(crate) struct BuildContext<'a> {
    /// Runtime metadata for the whole call; dynamic sections look up their
    /// item lists here by placeholder field name.
    pub dynamic: &'a DynamicMetadata,
    /// Per-item rule overrides while inside a dynamic-section item.
    pub item_rules: Option<&'a HashMap<String, StaticRuleAnnotation>>,
}

/// Subtree produced by one level of the walk.
#[derive(Default)]
pub(crate) struct BuiltFields {
    pub properties: BTreeMap<String, SchemaNode>,
    pub required: Vec<String>,
    pub elements: Vec<UiElement>,
}

pub struct FormGenerator {
    provider: Arc<dyn DescriptorProvider>,
}

impl FormGenerator {
    pub fn new(provider: Arc<dyn DescriptorProvider>) -> Self {
        Self { provider }
    }

    pub(crate) fn provider(&self) -> &dyn DescriptorProvider {
        self.provider.as_ref()
    }

    /// Generate the schema/uischema pair for a registered form type,
    /// expanding dynamic sections and overlaying runtime metadata.
    pub fn generate(
        &self,
        type_id: &str,
        dynamic: &DynamicMetadata,
    ) -> Result<FormResponse, GenerateError> {
        let descriptor = self
            .provider
            .descriptor(type_id)
            .ok_or_else(|| GenerateError::UnknownType(type_id.to_string()))?;

        let context = BuildContext {
            dynamic,
            item_rules: None,
        };
        let built = self.build_type(
            &descriptor,
            descriptor.layout.as_deref(),
            "#/properties/",
            context,
        );

        let mut schema =
            SchemaObject::new(descriptor.title.clone(), descriptor.description.clone());
        schema.properties = built.properties;
        schema.set_required(built.required);

        let mut uischema = UiElement::VerticalLayout {
            elements: built.elements,
        };

        overlay::apply(&mut schema, &mut uischema, dynamic, &descriptor);

        Ok(FormResponse { schema, uischema })
    }

    /// Walk one type's fields through the layout planner. `layout` is the
    /// plan in force at this level: the type's own for the root and for
    /// dynamic-section templates, the group annotation's for groups.
    pub(crate) fn build_type(
        &self,
        descriptor: &FormDescriptor,
        layout: Option<&[LayoutItem]>,
        scope_prefix: &str,
        context: BuildContext<'_>,
    ) -> BuiltFields {
        let mut built = BuiltFields::default();

        for group in layout::plan(&descriptor.fields, layout) {
            match group {
                PlacementGroup::Explicit {
                    orientation,
                    fields,
                } => {
                    let mut inner = BuiltFields::default();
                    for field in fields {
                        self.build_field(field, descriptor, scope_prefix, context, &mut inner);
                    }
                    built.properties.append(&mut inner.properties);
                    built.required.extend(inner.required);
                    built.elements.push(match orientation {
                        Orientation::Horizontal => UiElement::HorizontalLayout {
                            elements: inner.elements,
                        },
                        Orientation::Vertical => UiElement::VerticalLayout {
                            elements: inner.elements,
                        },
                    });
                }
                PlacementGroup::Implicit { fields } => {
                    // Trailing unclaimed fields render without a wrapper.
                    for field in fields {
                        self.build_field(field, descriptor, scope_prefix, context, &mut built);
                    }
                }
            }
        }

        built
    }

    fn build_field(
        &self,
        field: &FieldDescriptor,
        owner: &FormDescriptor,
        scope_prefix: &str,
        context: BuildContext<'_>,
        out: &mut BuiltFields,
    ) {
        if let Some(group) = &field.group {
            let Some(nested) = self.provider.descriptor(&group.type_name) else {
                warn!(
                    form = %owner.name,
                    field = %field.name,
                    group_type = %group.type_name,
                    "group references an unregistered type; skipping"
                );
                return;
            };
            let nested_prefix = format!("{}{}/properties/", scope_prefix, field.name);
            let inner =
                self.build_type(&nested, group.layout.as_deref(), &nested_prefix, context);

            let mut object = SchemaObject::new(Some(group.label.clone()), None);
            object.properties = inner.properties;
            object.set_required(inner.required);
            out.properties
                .insert(field.name.clone(), SchemaNode::Object(object));
            out.elements.push(UiElement::Group {
                label: Some(group.label.clone()),
                elements: inner.elements,
            });
        } else if let Some(dynamic) = &field.dynamic {
            dynamic_section::expand(self, field, dynamic, scope_prefix, context, out);
        } else if let Some(control) = &field.control {
            let property = SchemaProperty {
                schema_type: field.value_type.json_type().to_string(),
                title: control.label.clone(),
                description: control.description.clone(),
                format: control.format.clone().or(match control.kind {
                    ControlKind::DatePicker => Some("date".to_string()),
                    _ => None,
                }),
                min_length: control.min_length,
                max_length: control.max_length,
                pattern: control.pattern.clone(),
                enum_values: control.enum_values.clone(),
            };
            out.properties
                .insert(field.name.clone(), SchemaNode::Property(property));
            if control.required {
                out.required.push(field.name.clone());
            }

            let mut options = match control.kind {
                ControlKind::TextArea => {
                    let mut map = serde_json::Map::new();
                    map.insert("multi".to_string(), Value::Bool(true));
                    Some(map)
                }
                _ => None,
            };
            if let Some(text) = control.options.as_deref().filter(|t| !t.is_empty()) {
                match serde_json::from_str::<Value>(text) {
                    Ok(Value::Object(map)) => options = Some(map),
                    Ok(_) | Err(_) => {
                        warn!(
                            form = %owner.name,
                            field = %field.name,
                            options = %text,
                            "failed to parse control options as a JSON object; ignoring"
                        );
                    }
                }
            }

            // A per-item override replaces the field's static rule.
            let rule_spec = context
                .item_rules
                .and_then(|overrides| overrides.get(&field.name))
                .or(field.rule.as_ref());
            let rule = rule_spec.map(|spec| {
                rules::resolve(
                    spec.effect,
                    &spec.condition_field,
                    &spec.expected_value,
                    scope_prefix,
                    owner,
                )
            });

            out.elements.push(UiElement::Control {
                scope: format!("{}{}", scope_prefix, field.name),
                label: control.label.clone(),
                options,
                rule,
            });
        }
        // A field with no annotation is not part of the form.
    }
}

/// Render a runtime value as text. Missing values and JSON nulls degrade to
/// the literal `"null"`; strings are used verbatim.
pub(crate) fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
