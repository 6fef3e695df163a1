use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub mod descriptor;
pub mod schema;
pub mod uischema;

pub use descriptor::{
    ControlAnnotation, ControlKind, DynamicSectionAnnotation, FieldDescriptor, FormDescriptor,
    GroupAnnotation, LayoutItem, Orientation, RuleEffect, StaticRuleAnnotation, ValueType,
};
pub use schema::{SchemaNode, SchemaObject, SchemaProperty};
pub use uischema::{Condition, ConditionSchema, Rule, UiElement};

/// Runtime-supplied per-field metadata: field name mapped to a loosely-typed
/// bag of override keys (`enum`, `label`, `description`, `rule`, `data`).
pub type DynamicMetadata = HashMap<String, Map<String, Value>>;

/// The generated pair of documents returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    pub schema: SchemaObject,
    pub uischema: UiElement,
}

/// Port supplying form descriptors by type identifier.
///
/// Descriptors are immutable and may be cached process-wide; the generator
/// treats this as a pure, synchronous function of the type name.
pub trait DescriptorProvider: Send + Sync {
    fn descriptor(&self, name: &str) -> Option<Arc<FormDescriptor>>;
}
