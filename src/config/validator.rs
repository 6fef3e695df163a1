use std::collections::HashSet;
use thiserror::Error;

use crate::config::Settings;
use crate::domain::{FieldDescriptor, FormDescriptor};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Cross-reference error: {0}")]
    CrossReference(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_forms(&settings.forms) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &crate::config::ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_forms(forms: &[FormDescriptor]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let known_names: HashSet<&str> = forms.iter().map(|f| f.name.as_str()).collect();

        let mut seen = HashSet::new();
        for form in forms {
            if form.name.is_empty() {
                errors.push(ValidationError::MissingField("form.name".to_string()));
            }
            if !seen.insert(form.name.as_str()) {
                errors.push(ValidationError::Duplicate(format!(
                    "form '{}'",
                    form.name
                )));
            }

            Self::validate_fields(form, &known_names, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_fields(
        form: &FormDescriptor,
        known_names: &HashSet<&str>,
        errors: &mut Vec<ValidationError>,
    ) {
        let mut seen_fields = HashSet::new();
        let mut placed = HashSet::new();

        for field in &form.fields {
            if field.name.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "field name in form '{}'",
                    form.name
                )));
            }
            if !seen_fields.insert(field.name.as_str()) {
                errors.push(ValidationError::Duplicate(format!(
                    "field '{}' in form '{}'",
                    field.name, form.name
                )));
            }

            Self::validate_annotations(form, field, known_names, errors);
        }

        // A field name may be claimed by at most one layout item.
        if let Some(layout) = &form.layout {
            for item in layout {
                for name in &item.fields {
                    if !placed.insert(name.as_str()) {
                        errors.push(ValidationError::Duplicate(format!(
                            "layout placement of field '{}' in form '{}'",
                            name, form.name
                        )));
                    }
                }
            }
        }
    }

    fn validate_annotations(
        form: &FormDescriptor,
        field: &FieldDescriptor,
        known_names: &HashSet<&str>,
        errors: &mut Vec<ValidationError>,
    ) {
        let annotation_count = [
            field.control.is_some(),
            field.group.is_some(),
            field.dynamic.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();
        if annotation_count > 1 {
            errors.push(ValidationError::InvalidValue {
                field: format!("{}.{}", form.name, field.name),
                reason: "control, group and dynamic annotations are mutually exclusive"
                    .to_string(),
            });
        }

        if field.rule.is_some() && field.control.is_none() {
            errors.push(ValidationError::InvalidValue {
                field: format!("{}.{}", form.name, field.name),
                reason: "a rule is only meaningful alongside a control annotation".to_string(),
            });
        }

        if let Some(group) = &field.group {
            if !known_names.contains(group.type_name.as_str()) {
                errors.push(ValidationError::CrossReference(format!(
                    "group '{}.{}' references unknown type '{}'",
                    form.name, field.name, group.type_name
                )));
            }
        }

        if let Some(dynamic) = &field.dynamic {
            if !known_names.contains(dynamic.item_type.as_str()) {
                errors.push(ValidationError::CrossReference(format!(
                    "dynamic section '{}.{}' references unknown template '{}'",
                    form.name, field.name, dynamic.item_type
                )));
            }
            if dynamic.key_field.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "{}.{}.key_field",
                    form.name, field.name
                )));
            }
            if dynamic.label_field.is_empty() {
                errors.push(ValidationError::MissingField(format!(
                    "{}.{}.label_field",
                    form.name, field.name
                )));
            }
        }
    }
}
