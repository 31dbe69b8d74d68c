//! Author entity model and input schemas.

use fabula_core::resource::Resource;
use fabula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `authors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: DbId,
    pub name: String,
    /// NOT NULL in the database; defaults to `Unknown`.
    pub nationality: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Resource for Author {
    const ENTITY: &'static str = "Author";
    const SINGULAR: &'static str = "author";
    const COLLECTION: &'static str = "authors";
    const CHILDREN: &'static [&'static str] = &["novels"];

    fn id(&self) -> DbId {
        self.id
    }
}

/// POST body for a new author.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAuthor {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    /// Defaults to `Unknown` if omitted.
    #[validate(length(min = 1))]
    pub nationality: Option<String>,
}

/// PUT body: every updatable field must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReplaceAuthor {
    #[validate(required)]
    pub name: Option<String>,
    #[validate(required)]
    pub nationality: Option<String>,
}

/// PATCH body. All fields are optional; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateAuthor {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub nationality: Option<String>,
}

impl From<ReplaceAuthor> for UpdateAuthor {
    fn from(input: ReplaceAuthor) -> Self {
        Self {
            name: input.name,
            nationality: input.nationality,
        }
    }
}

#[cfg(test)]
mod tests {
    use fabula_core::error::CoreError;

    use super::*;

    #[test]
    fn create_requires_name() {
        let input = CreateAuthor {
            name: None,
            nationality: Some("French".into()),
        };
        let err = CoreError::from(input.validate().unwrap_err());
        assert!(matches!(err, CoreError::Validation { fields } if fields == ["name"]));
    }

    #[test]
    fn create_rejects_unknown_fields() {
        let result: Result<CreateAuthor, _> =
            serde_json::from_str(r#"{"name": "Isaac Asimov", "born": 1920}"#);
        assert!(result.is_err());
    }

    #[test]
    fn replace_detects_missing_field() {
        let input: ReplaceAuthor = serde_json::from_str(r#"{"nationality": "Canadian"}"#).unwrap();
        assert!(input.validate().is_err());

        let input: ReplaceAuthor =
            serde_json::from_str(r#"{"name": "William Gibson", "nationality": "Canadian"}"#)
                .unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn empty_patch_is_valid() {
        let input: UpdateAuthor = serde_json::from_str("{}").unwrap();
        assert!(input.validate().is_ok());
    }
}
