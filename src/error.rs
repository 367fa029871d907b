use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Errors surfaced by the recommendation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The submitted profile is malformed; no partial result is produced
    #[error("invalid profile field `{field}`: {message}")]
    Validation { field: String, message: String },

    /// Scoring tables are outside their allowed domain
    #[error("invalid scoring tables: {0}")]
    InvalidTables(String),
}

impl EngineError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending profile field, if this is a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::Validation { field, .. } => Some(field),
            EngineError::InvalidTables(_) => None,
        }
    }
}

impl From<ValidationErrors> for EngineError {
    /// Reports the first failing field in path order so errors are deterministic
    fn from(errors: ValidationErrors) -> Self {
        let mut failures = Vec::new();
        collect_failures(&errors, String::new(), &mut failures);
        failures.sort();

        match failures.into_iter().next() {
            Some((field, message)) => EngineError::Validation { field, message },
            None => EngineError::validation("profile", "validation failed"),
        }
    }
}

fn collect_failures(errors: &ValidationErrors, prefix: String, out: &mut Vec<(String, String)>) {
    for (name, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push((path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_failures(nested, path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_failures(nested, format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let error = EngineError::validation("usage.mainPurpose", "unrecognized main purpose `x`");
        assert_eq!(
            error.to_string(),
            "invalid profile field `usage.mainPurpose`: unrecognized main purpose `x`"
        );
        assert_eq!(error.field(), Some("usage.mainPurpose"));
    }

    #[test]
    fn test_tables_error_has_no_field() {
        let error = EngineError::InvalidTables("tolerance".to_string());
        assert_eq!(error.field(), None);
    }
}
