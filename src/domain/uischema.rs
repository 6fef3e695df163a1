//! UI-schema half of the generated output.
//!
//! A closed tagged variant over Control, Group, HorizontalLayout and
//! VerticalLayout; exhaustive matching replaces the class-hierarchy walks
//! the concept is usually expressed with.

use crate::domain::descriptor::RuleEffect;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One element of the UI tree, discriminated by `type` in the serialized
/// form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiElement {
    Control {
        scope: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        options: Option<Map<String, Value>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rule: Option<Rule>,
    },
    Group {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        elements: Vec<UiElement>,
    },
    HorizontalLayout {
        elements: Vec<UiElement>,
    },
    VerticalLayout {
        elements: Vec<UiElement>,
    },
}

impl UiElement {
    /// Depth-first search for the first Control with the given scope.
    /// Containers of every kind are searched recursively.
    pub fn find_control_mut(&mut self, scope_to_find: &str) -> Option<&mut UiElement> {
        if matches!(self, UiElement::Control { scope, .. } if scope.as_str() == scope_to_find) {
            return Some(self);
        }
        match self {
            UiElement::Control { .. } => None,
            UiElement::Group { elements, .. }
            | UiElement::HorizontalLayout { elements }
            | UiElement::VerticalLayout { elements } => elements
                .iter_mut()
                .find_map(|element| element.find_control_mut(scope_to_find)),
        }
    }
}

/// A declarative visibility/enablement rule attached to a Control. The
/// generator only emits the condition; evaluation happens in the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub effect: RuleEffect,
    pub condition: Condition,
}

/// The condition half of a rule: a schema path plus a constant to compare
/// equality against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub scope: String,
    pub schema: ConditionSchema,
}

impl Condition {
    pub fn leaf(scope: String, expected: Value) -> Self {
        Self {
            condition_type: "LEAF".to_string(),
            scope,
            schema: ConditionSchema { constant: expected },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSchema {
    #[serde(rename = "const")]
    pub constant: Value,
}
