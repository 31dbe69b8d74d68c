//! Novel entity model and input schemas.

use fabula_core::resource::{ParentLink, Resource};
use fabula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `novels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Novel {
    pub id: DbId,
    pub name: String,
    pub year: Option<i32>,
    pub plot: Option<String>,
    /// Set to NULL when the owning author is deleted.
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Resource for Novel {
    const ENTITY: &'static str = "Novel";
    const SINGULAR: &'static str = "novel";
    const COLLECTION: &'static str = "novels";
    const CHILDREN: &'static [&'static str] = &["characters"];

    fn id(&self) -> DbId {
        self.id
    }

    fn parents(&self) -> Vec<ParentLink> {
        self.author_id
            .map(|id| ParentLink {
                rel: "author",
                collection: "authors",
                id,
            })
            .into_iter()
            .collect()
    }
}

/// POST body for a new novel. The author may be attached later.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateNovel {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub author_id: Option<DbId>,
}

/// PUT body: every updatable field must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReplaceNovel {
    #[validate(required)]
    pub name: Option<String>,
    #[validate(required)]
    pub year: Option<i32>,
    #[validate(required)]
    pub plot: Option<String>,
    #[validate(required)]
    pub author_id: Option<DbId>,
}

/// PATCH body. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateNovel {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub year: Option<i32>,
    pub plot: Option<String>,
    pub author_id: Option<DbId>,
}

impl From<ReplaceNovel> for UpdateNovel {
    fn from(input: ReplaceNovel) -> Self {
        Self {
            name: input.name,
            year: input.year,
            plot: input.plot,
            author_id: input.author_id,
        }
    }
}
