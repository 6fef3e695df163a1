//! Rule Resolver: turns a rule specification into a schema-path-qualified
//! condition with a typed expected value.
//!
//! The condition field is assumed to be a sibling of the field the rule is
//! attached to, so its scope is built from the caller's current prefix.
//! Coercion failures fall back to a plain string comparison; resolution
//! never aborts generation.

use crate::domain::{Condition, FormDescriptor, Rule, RuleEffect, StaticRuleAnnotation, ValueType};
use serde_json::Value;
use tracing::warn;

/// Resolve a rule against the type that owns the condition field.
///
/// `scope_prefix` is the same prefix used for the field the rule is attached
/// to (e.g. `#/properties/` at the root, or an item-qualified prefix inside
/// a dynamic section).
pub fn resolve(
    effect: RuleEffect,
    condition_field: &str,
    expected_text: &str,
    scope_prefix: &str,
    owner: &FormDescriptor,
) -> Rule {
    let expected = coerce_expected(expected_text, condition_field, owner);
    Rule {
        effect,
        condition: Condition::leaf(format!("{}{}", scope_prefix, condition_field), expected),
    }
}

/// Coerce `text` into the declared type of `condition_field` on `owner`.
/// Unknown fields and unparseable literals degrade to a string comparison.
fn coerce_expected(text: &str, condition_field: &str, owner: &FormDescriptor) -> Value {
    let Some(field) = owner.field(condition_field) else {
        warn!(
            form = %owner.name,
            field = %condition_field,
            "rule condition field not found; comparing as string"
        );
        return Value::String(text.to_string());
    };

    match field.value_type {
        ValueType::Boolean => match text.parse::<bool>() {
            Ok(parsed) => Value::Bool(parsed),
            Err(_) => fallback(text, condition_field, "boolean"),
        },
        ValueType::Integer => match text.parse::<i64>() {
            Ok(parsed) => Value::from(parsed),
            Err(_) => fallback(text, condition_field, "integer"),
        },
        ValueType::Number => match text.parse::<f64>() {
            Ok(parsed) => serde_json::Number::from_f64(parsed)
                .map(Value::Number)
                .unwrap_or_else(|| fallback(text, condition_field, "number")),
            Err(_) => fallback(text, condition_field, "number"),
        },
        ValueType::String | ValueType::Enum | ValueType::Object => Value::String(text.to_string()),
    }
}

/// Decode a runtime rule specification (`{effect, conditionField,
/// expectedValue}`) into the same shape a static annotation carries. Returns
/// `None` when a required key is missing or the effect is unrecognized.
pub(crate) fn parse_rule_spec(spec: &Value) -> Option<StaticRuleAnnotation> {
    let entries = spec.as_object()?;
    let effect: RuleEffect = serde_json::from_value(entries.get("effect")?.clone()).ok()?;
    let condition_field = entries.get("conditionField")?.as_str()?.to_string();
    let expected_value = crate::adapters::generator::value_text(Some(entries.get("expectedValue")?));
    Some(StaticRuleAnnotation {
        effect,
        condition_field,
        expected_value,
    })
}

fn fallback(text: &str, condition_field: &str, expected_type: &str) -> Value {
    warn!(
        field = %condition_field,
        value = %text,
        expected_type,
        "rule expected value failed to parse; comparing as string"
    );
    Value::String(text.to_string())
}
