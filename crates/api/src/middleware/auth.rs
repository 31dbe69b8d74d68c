//! Shared-secret guard for mutating endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fabula_core::error::CoreError;
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

const REJECTION_MESSAGE: &str = "Invalid or missing access token.";

/// Proof that the request may mutate data.
///
/// When `SECRET_TOKEN` is configured the `x-access-token` header must match
/// it exactly; otherwise every request is granted.
///
/// ```ignore
/// async fn create(_access: WriteAccess, ...) -> AppResult<...> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WriteAccess;

impl FromRequestParts<AppState> for WriteAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.access_token.as_deref() else {
            return Ok(WriteAccess);
        };

        let provided = parts
            .headers
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());

        match provided {
            Some(token) if tokens_match(token, expected) => Ok(WriteAccess),
            _ => {
                tracing::warn!(
                    method = %parts.method,
                    uri = %parts.uri,
                    "Rejected write without a valid access token"
                );
                Err(AppError::Core(CoreError::Unauthorized(
                    REJECTION_MESSAGE.into(),
                )))
            }
        }
    }
}

/// Constant-time comparison of the supplied token against the secret.
fn tokens_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_tokens_match() {
        assert!(tokens_match("s3cret", "s3cret"));
    }

    #[test]
    fn different_tokens_do_not_match() {
        assert!(!tokens_match("s3cret", "s3creT"));
        assert!(!tokens_match("s3cre", "s3cret"));
        assert!(!tokens_match("", "s3cret"));
    }
}
