use validator::ValidationErrors;

use crate::fields::failed_fields;
use crate::types::DbId;

/// Domain-level failures, independent of transport.
///
/// `fields` always carries API (camelCase) field names.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed for fields: {fields:?}")]
    Validation { fields: Vec<String> },

    #[error("Referenced resource does not exist: {fields:?}")]
    InvalidReference { fields: Vec<String> },

    #[error("Conflict on fields: {fields:?}")]
    Conflict { fields: Vec<String> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation {
            fields: failed_fields(&errors),
        }
    }
}
