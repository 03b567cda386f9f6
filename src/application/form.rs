// Form card submission checks against the field schema
use crate::application::widget_model::FormCardModel;
use crate::domain::widget::{FieldKind, FormField};
use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Field `{field}` is required")]
    Required { field: String },

    #[error("Field `{field}` must be at least {min_len} characters")]
    TooShort { field: String, min_len: usize },

    #[error("Field `{field}` does not match pattern `{pattern}`")]
    PatternMismatch { field: String, pattern: String },

    #[error("Field `{field}` has an invalid pattern `{pattern}`")]
    InvalidPattern { field: String, pattern: String },

    #[error("Field `{field}` value `{value}` is not one of the options")]
    NotAnOption { field: String, value: String },

    #[error("Field `{field}` must be `true` or `false`")]
    NotABoolean { field: String },
}

impl FormCardModel {
    /// Checks submitted `values` (field id -> raw text) against the schema.
    ///
    /// Every field is checked in schema order and all problems are returned.
    pub fn validate(&self, values: &HashMap<String, String>) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = self
            .props()
            .schema
            .fields
            .iter()
            .filter_map(|field| check_field(field, values.get(&field.id).map(String::as_str)))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!("Form {} rejected with {} errors", self.id(), errors.len());
            Err(errors)
        }
    }
}

fn check_field(field: &FormField, value: Option<&str>) -> Option<FieldError> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ if field.required => {
            return Some(FieldError::Required {
                field: field.id.clone(),
            });
        }
        _ => return None,
    };

    if let Some(min_len) = field.min_len {
        if value.chars().count() < min_len {
            return Some(FieldError::TooShort {
                field: field.id.clone(),
                min_len,
            });
        }
    }

    if let Some(pattern) = &field.pattern {
        match Regex::new(&format!("^(?:{})$", pattern)) {
            Ok(re) if !re.is_match(value) => {
                return Some(FieldError::PatternMismatch {
                    field: field.id.clone(),
                    pattern: pattern.clone(),
                });
            }
            Ok(_) => {}
            Err(_) => {
                return Some(FieldError::InvalidPattern {
                    field: field.id.clone(),
                    pattern: pattern.clone(),
                });
            }
        }
    }

    match field.kind {
        FieldKind::Select => match &field.options {
            Some(options) if !options.iter().any(|o| o == value) => Some(FieldError::NotAnOption {
                field: field.id.clone(),
                value: value.to_string(),
            }),
            _ => None,
        },
        FieldKind::Toggle if value != "true" && value != "false" => Some(FieldError::NotABoolean {
            field: field.id.clone(),
        }),
        _ => None,
    }
}
