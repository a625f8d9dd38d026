// Converts store errors into the messages a presentation layer shows its users.
use crate::errors::{StoreError, ValidationError};

impl StoreError {
    pub fn user_message(&self) -> String {
        match self {
            // Unknown user and wrong password share one message
            StoreError::Auth(_) => "Invalid username or password".to_string(),

            StoreError::Forbidden(msg) => format!("You are not allowed to {}", msg),

            StoreError::NotFound(what) => format!("Not found: {}", what),

            StoreError::AlreadyExists(what) => format!("{} already exists", what),

            StoreError::AlreadyCompleted(task_id) => {
                format!("Task {} has already been completed", task_id)
            }

            StoreError::Validation(err) => validation_message(err),

            // Persistence failures: the previous document is still in place
            StoreError::File(_) | StoreError::Corrupt { .. } => {
                "The data store could not be read or written; no changes were saved".to_string()
            }

            StoreError::Hash(_) => "The password could not be processed".to_string(),
        }
    }
}

fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::MissingField(field) => format!("Please enter a {}", field.replace('_', " ")),
        ValidationError::NotAllowed { field, value } => {
            format!("'{}' is not a configured {}", value, field.replace('_', " "))
        }
        ValidationError::LastSuperAdmin => err.to_string(),
    }
}
