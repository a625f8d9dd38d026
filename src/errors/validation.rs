use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{value:?} is not an allowed {field}")]
    NotAllowed { field: &'static str, value: String },

    #[error("The last super admin account cannot be removed")]
    LastSuperAdmin,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejects empty or whitespace-only values for a required field.
pub fn require(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}
