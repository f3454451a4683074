//! Errors for typed row access.
//!
//! Sorting, selection, and rendering never fail. These errors only come from the strict accessors
//! on [`crate::table::Row`], which callers use when they want to validate data before handing it
//! to a table.

/// Error type for field access operations on a row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The requested field does not exist in the row.
    #[error("field '{field}' not found in row")]
    Missing { field: String },

    /// The field exists but holds a different type than requested.
    #[error("field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// The field name the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            FieldError::missing("email").to_string(),
            "field 'email' not found in row"
        );
        assert_eq!(
            FieldError::type_mismatch("age", "int", "text").to_string(),
            "field 'age' type mismatch: expected int, got text"
        );
        assert_eq!(FieldError::missing("id").field(), "id");
    }
}
