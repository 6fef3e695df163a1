//! Data-schema half of the generated output.
//!
//! The tree consists of object nodes (`properties` + `required`) and leaf
//! properties. Optional attributes are omitted from the serialized form
//! entirely, never emitted as null.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A member of the data-shape tree: either a nested object or a leaf
/// property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaNode {
    Object(SchemaObject),
    Property(SchemaProperty),
}

impl SchemaNode {
    pub fn as_property_mut(&mut self) -> Option<&mut SchemaProperty> {
        match self {
            SchemaNode::Property(property) => Some(property),
            SchemaNode::Object(_) => None,
        }
    }
}

/// An object node: the root schema and every nested group/dynamic item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: BTreeMap<String, SchemaNode>,
    /// Names of required properties; omitted when empty. Invariant: every
    /// entry is a key of `properties`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl SchemaObject {
    pub fn new(title: Option<String>, description: Option<String>) -> Self {
        Self {
            schema_type: "object".to_string(),
            title,
            description,
            properties: BTreeMap::new(),
            required: None,
        }
    }

    /// Set the required list, collapsing an empty list to an omitted field.
    pub fn set_required(&mut self, required: Vec<String>) {
        self.required = if required.is_empty() {
            None
        } else {
            Some(required)
        };
    }
}

/// A leaf property describing a single field's type and constraints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaProperty {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}
