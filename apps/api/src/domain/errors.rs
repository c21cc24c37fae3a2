use thiserror::Error;

/// Validation failures raised while building domain values from user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{0}")]
    Invalid(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Trims a required text field and checks it against a length limit
pub(crate) fn required_text(field: &'static str, value: &str, max: usize) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Empty { field });
    }
    bounded_text(field, value, max)
}

/// Trims an optional text field and checks it against a length limit
pub(crate) fn bounded_text(field: &'static str, value: &str, max: usize) -> DomainResult<String> {
    let value = value.trim();
    if value.chars().count() > max {
        return Err(DomainError::TooLong { field, max });
    }
    Ok(value.to_string())
}
