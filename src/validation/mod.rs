//! Field validation decoupled from response serialisation.
//!
//! Rules accumulate per-field messages into a [`Violations`] map instead of
//! short-circuiting, so a single 400 response reports every failing field.

use crate::error::{ApiError, FieldErrors};

/// Collected validation failures, keyed by field name
#[derive(Debug, Default)]
pub struct Violations {
    fields: FieldErrors,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Field must be present with a non-blank value
    pub fn require(&mut self, field: &str, value: Option<&str>) {
        if !matches!(value, Some(v) if !v.trim().is_empty()) {
            self.push(field, format!("The {} field is required.", label(field)));
        }
    }

    /// Length ceiling, applied only when the field carries a value
    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(v) = value {
            if v.chars().count() > max {
                self.push(
                    field,
                    format!(
                        "The {} field must not be greater than {} characters.",
                        label(field),
                        max
                    ),
                );
            }
        }
    }

    /// Email format, applied only when the field carries a non-blank value
    pub fn email(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            if !v.trim().is_empty() && !is_valid_email(v) {
                self.push(
                    field,
                    format!("The {} field must be a valid email address.", label(field)),
                );
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(self.fields))
        }
    }
}

/// Human-readable field label: snake_case name with spaces
fn label(field: &str) -> String {
    field.replace('_', " ")
}

/// Structural email check: one `@` separating a non-empty local part from a
/// dotted domain, no whitespace anywhere
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|part| !part.is_empty())
}
