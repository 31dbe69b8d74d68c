//! Handlers for the `/characters` resource.

use axum::extract::State;
use axum::http::StatusCode;
use fabula_core::error::CoreError;
use fabula_core::types::DbId;
use fabula_db::models::character::{
    Character, CreateCharacter, ReplaceCharacter, UpdateCharacter,
};
use fabula_db::repositories::CharacterRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{from_body, ApiJson, ApiPath};
use crate::middleware::auth::WriteAccess;
use crate::response::{CollectionResponse, Envelope, ResourceResponse};
use crate::state::AppState;

async fn find(state: &AppState, id: DbId) -> AppResult<Character> {
    CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found::<Character>(id))
}

/// GET /api/characters
pub async fn list(State(state): State<AppState>) -> AppResult<CollectionResponse<Character>> {
    let characters = CharacterRepo::list(&state.pool).await?;
    Ok(Envelope::collection(characters, state.prefix()))
}

/// GET /api/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<ResourceResponse<Character>> {
    let character = find(&state, id).await?;
    Ok(Envelope::resource(character, state.prefix()))
}

/// POST /api/characters
pub async fn create(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiJson(input): ApiJson<CreateCharacter>,
) -> AppResult<ResourceResponse<Character>> {
    input.validate().map_err(CoreError::from)?;
    let character = CharacterRepo::create(&state.pool, &input).await?;
    tracing::info!(character_id = character.id, "Character created");
    Ok(Envelope::created(character, state.prefix())
        .with_message("Character was successfully created"))
}

/// PUT /api/characters/{id}
pub async fn replace(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> AppResult<ResourceResponse<Character>> {
    find(&state, id).await?;
    let input: ReplaceCharacter = from_body(body)?;
    input.validate().map_err(|_| AppError::incomplete_payload())?;

    let input = UpdateCharacter::from(input);
    input.validate().map_err(CoreError::from)?;
    let character = CharacterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found::<Character>(id))?;
    Ok(Envelope::resource(character, state.prefix())
        .with_message("Character successfully updated"))
}

/// PATCH /api/characters/{id}
pub async fn update(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> AppResult<ResourceResponse<Character>> {
    find(&state, id).await?;
    let input: UpdateCharacter = from_body(body)?;
    input.validate().map_err(CoreError::from)?;
    let character = CharacterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found::<Character>(id))?;
    Ok(Envelope::resource(character, state.prefix()).with_message("Update successful"))
}

/// DELETE /api/characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if CharacterRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found::<Character>(id))
    }
}
