//! Character entity model and input schemas.

use fabula_core::resource::{ParentLink, Resource};
use fabula_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub age: Option<i32>,
    pub birth_place: Option<String>,
    pub bio: Option<String>,
    pub occupation: Option<String>,
    pub novel_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Resource for Character {
    const ENTITY: &'static str = "Character";
    const SINGULAR: &'static str = "character";
    const COLLECTION: &'static str = "characters";

    fn id(&self) -> DbId {
        self.id
    }

    fn parents(&self) -> Vec<ParentLink> {
        self.novel_id
            .map(|id| ParentLink {
                rel: "novel",
                collection: "novels",
                id,
            })
            .into_iter()
            .collect()
    }
}

/// POST body for a new character.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCharacter {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub age: Option<i32>,
    pub birth_place: Option<String>,
    pub bio: Option<String>,
    pub occupation: Option<String>,
    pub novel_id: Option<DbId>,
}

/// PUT body: every updatable field must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReplaceCharacter {
    #[validate(required)]
    pub name: Option<String>,
    #[validate(required)]
    pub age: Option<i32>,
    #[validate(required)]
    pub birth_place: Option<String>,
    #[validate(required)]
    pub bio: Option<String>,
    #[validate(required)]
    pub occupation: Option<String>,
    #[validate(required)]
    pub novel_id: Option<DbId>,
}

/// PATCH body. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCharacter {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub age: Option<i32>,
    pub birth_place: Option<String>,
    pub bio: Option<String>,
    pub occupation: Option<String>,
    pub novel_id: Option<DbId>,
}

impl From<ReplaceCharacter> for UpdateCharacter {
    fn from(input: ReplaceCharacter) -> Self {
        Self {
            name: input.name,
            age: input.age,
            birth_place: input.birth_place,
            bio: input.bio,
            occupation: input.occupation,
            novel_id: input.novel_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use fabula_core::links::Linked;

    use super::*;

    #[test]
    fn serializes_with_camel_case_and_novel_link() {
        let character = Character {
            id: 5,
            name: "Case".into(),
            age: Some(24),
            birth_place: Some("Sprawl".into()),
            bio: None,
            occupation: Some("Console cowboy".into()),
            novel_id: Some(2),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let value = serde_json::to_value(Linked::new(character, "/api")).unwrap();
        assert_eq!(value["birthPlace"], "Sprawl");
        assert_eq!(value["novelId"], 2);
        assert_eq!(value["href"], "/api/characters/5");
        assert_eq!(value["novel"], "/api/novels/2");
    }

    #[test]
    fn missing_name_reports_name_field() {
        let input: CreateCharacter = serde_json::from_str(r#"{"age": 30}"#).unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
