//! Extractors whose rejections are rendered as JSON error envelopes.
//!
//! Axum's stock `Json` and `Path` extractors reply with plain-text bodies on
//! failure; these wrappers route the rejection through [`AppError`] instead.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body. Malformed JSON, a wrong content type, unknown fields
/// or mistyped values all produce a 400 envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters. An id that does not parse cannot name any record and is
/// reported as not found.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Decode an already-parsed body into a typed input schema.
///
/// Lets a handler look the target record up before judging the body's
/// fields, so a missing record wins over an unknown field.
pub fn from_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| {
        tracing::debug!(reason = %e, "Rejected request body");
        AppError::BadRequest(format!("Bad request. {e}"))
    })
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        AppError::BadRequest(format!("Bad request. {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidId(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Shelf {
        label: String,
    }

    #[test]
    fn decodes_matching_body() {
        let shelf: Shelf = from_body(json!({"label": "noir"})).unwrap();
        assert_eq!(shelf.label, "noir");
    }

    #[test]
    fn unknown_field_is_bad_request() {
        let result = from_body::<Shelf>(json!({"label": "noir", "colour": "red"}));
        assert_matches!(result, Err(AppError::BadRequest(msg)) if msg.starts_with("Bad request. "));
    }
}
