use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fabula_core::error::CoreError;
use fabula_core::resource::Resource;
use fabula_core::types::DbId;
use fabula_db::violation::violation;

use crate::response::ErrorBody;

pub const CONFLICT_MESSAGE: &str =
    "A resource with the following fields already exists in the database.";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields.";
pub const INVALID_REFERENCE_MESSAGE: &str = "Referenced resource does not exist.";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";
pub const INCOMPLETE_PAYLOAD_MESSAGE: &str = "Bad request. Please provide all the fields";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed.";
pub const TIMEOUT_MESSAGE: &str = "Request timed out.";
pub const INTERNAL_MESSAGE: &str = "An error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`sqlx::Error`] for raw
/// datastore failures. Every variant is turned into a JSON error envelope by
/// [`classify`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fabula_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx, classified on the way out.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A path segment that cannot name any resource (e.g. a non-numeric id).
    #[error("Invalid resource id: {0}")]
    InvalidId(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The lookup-by-id sentinel for resource `R`.
    pub fn not_found<R: Resource>(id: DbId) -> Self {
        AppError::Core(CoreError::NotFound {
            entity: R::ENTITY,
            id,
        })
    }

    /// A PUT body that does not carry every updatable field.
    pub fn incomplete_payload() -> Self {
        AppError::BadRequest(INCOMPLETE_PAYLOAD_MESSAGE.to_string())
    }
}

/// HTTP-facing error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    ValidationError,
    NotFound,
    BadRequest,
    Unauthorized,
    MethodNotAllowed,
    Timeout,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::Timeout => StatusCode::REQUEST_TIMEOUT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A normalized error: what kind it is, what to tell the client, and which
/// fields were involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: ErrorKind,
    pub message: String,
    /// Present for conflict and validation errors only.
    pub fields: Option<Vec<String>>,
}

impl Classified {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: None,
        }
    }

    fn with_fields(kind: ErrorKind, message: &str, fields: Vec<String>) -> Self {
        Self {
            kind,
            message: message.to_string(),
            fields: Some(fields),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal, INTERNAL_MESSAGE)
    }
}

/// Map any handler error to its HTTP-facing classification.
///
/// Priority: uniqueness violations, then validation failures, then
/// not-found, then everything else as an internal error.
pub fn classify(err: &AppError) -> Classified {
    match err {
        AppError::Core(core) => classify_core_error(core),
        AppError::Database(db) => classify_sqlx_error(db),
        AppError::InvalidId(raw) => {
            tracing::debug!(id = %raw, "Unparseable resource id");
            Classified::new(ErrorKind::NotFound, NOT_FOUND_MESSAGE)
        }
        AppError::BadRequest(msg) => Classified::new(ErrorKind::BadRequest, msg.clone()),
    }
}

fn classify_core_error(err: &CoreError) -> Classified {
    match err {
        CoreError::Conflict { fields } => {
            Classified::with_fields(ErrorKind::Conflict, CONFLICT_MESSAGE, fields.clone())
        }
        CoreError::Validation { fields } => Classified::with_fields(
            ErrorKind::ValidationError,
            MISSING_FIELDS_MESSAGE,
            fields.clone(),
        ),
        CoreError::InvalidReference { fields } => Classified::with_fields(
            ErrorKind::ValidationError,
            INVALID_REFERENCE_MESSAGE,
            fields.clone(),
        ),
        CoreError::NotFound { entity, id } => {
            tracing::debug!(entity, id, "Resource not found");
            Classified::new(ErrorKind::NotFound, NOT_FOUND_MESSAGE)
        }
        CoreError::Unauthorized(msg) => Classified::new(ErrorKind::Unauthorized, msg.clone()),
    }
}

/// Classify a sqlx error through the structured violation layer.
///
/// - Unique violations map to 409.
/// - NOT NULL and CHECK violations map to 422 "Missing required fields.".
/// - Foreign-key violations map to 422 naming the dangling reference.
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    if let Some(v) = violation(err) {
        return classify_core_error(&CoreError::from(v));
    }

    match err {
        sqlx::Error::RowNotFound => Classified::new(ErrorKind::NotFound, NOT_FOUND_MESSAGE),
        other => {
            tracing::error!(error = %other, "Database error");
            Classified::internal()
        }
    }
}

impl IntoResponse for Classified {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, axum::Json(ErrorBody::from(self))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        classify(&self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_status_codes() {
        assert_eq!(ErrorKind::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorKind::ValidationError.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorKind::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ErrorKind::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            ErrorKind::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn row_not_found_is_not_found() {
        let classified = classify(&AppError::Database(sqlx::Error::RowNotFound));
        assert_eq!(classified.kind, ErrorKind::NotFound);
        assert_eq!(classified.message, NOT_FOUND_MESSAGE);
        assert!(classified.fields.is_none());
    }

    #[test]
    fn pool_timeout_is_internal() {
        let classified = classify(&AppError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(classified, Classified::internal());
    }

    #[test]
    fn incomplete_payload_is_bad_request() {
        let classified = classify(&AppError::incomplete_payload());
        assert_eq!(classified.kind, ErrorKind::BadRequest);
        assert_eq!(classified.message, INCOMPLETE_PAYLOAD_MESSAGE);
    }

    #[test]
    fn invalid_reference_is_validation_error() {
        let classified = classify(&AppError::Core(CoreError::InvalidReference {
            fields: vec!["authorId".into()],
        }));
        assert_eq!(classified.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(classified.message, INVALID_REFERENCE_MESSAGE);
        assert_eq!(classified.fields, Some(vec!["authorId".to_string()]));
    }
}
