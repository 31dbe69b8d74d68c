//! Handlers for the `/novels` resource.
//!
//! `/novels[/{id}]` plus the `/novels/{id}/characters` sub-collection.

use axum::extract::State;
use axum::http::StatusCode;
use fabula_core::error::CoreError;
use fabula_core::types::DbId;
use fabula_db::models::character::Character;
use fabula_db::models::novel::{CreateNovel, Novel, ReplaceNovel, UpdateNovel};
use fabula_db::repositories::{CharacterRepo, NovelRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{from_body, ApiJson, ApiPath};
use crate::middleware::auth::WriteAccess;
use crate::response::{CollectionResponse, Envelope, ResourceResponse};
use crate::state::AppState;

async fn find(state: &AppState, id: DbId) -> AppResult<Novel> {
    NovelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found::<Novel>(id))
}

/// GET /api/novels
pub async fn list(State(state): State<AppState>) -> AppResult<CollectionResponse<Novel>> {
    let novels = NovelRepo::list(&state.pool).await?;
    Ok(Envelope::collection(novels, state.prefix()))
}

/// GET /api/novels/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<ResourceResponse<Novel>> {
    let novel = find(&state, id).await?;
    Ok(Envelope::resource(novel, state.prefix()))
}

/// GET /api/novels/{id}/characters
pub async fn list_characters(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<CollectionResponse<Character>> {
    let novel = find(&state, id).await?;
    let characters = CharacterRepo::list_by_novel(&state.pool, novel.id).await?;
    Ok(Envelope::collection(characters, state.prefix()))
}

/// POST /api/novels
pub async fn create(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiJson(input): ApiJson<CreateNovel>,
) -> AppResult<ResourceResponse<Novel>> {
    input.validate().map_err(CoreError::from)?;
    let novel = NovelRepo::create(&state.pool, &input).await?;
    tracing::info!(novel_id = novel.id, author_id = ?novel.author_id, "Novel created");
    Ok(Envelope::created(novel, state.prefix()).with_message("Novel was successfully added"))
}

/// PUT /api/novels/{id}
pub async fn replace(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> AppResult<ResourceResponse<Novel>> {
    find(&state, id).await?;
    let input: ReplaceNovel = from_body(body)?;
    input.validate().map_err(|_| AppError::incomplete_payload())?;

    let input = UpdateNovel::from(input);
    input.validate().map_err(CoreError::from)?;
    let novel = NovelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found::<Novel>(id))?;
    Ok(Envelope::resource(novel, state.prefix()).with_message("Novel successfully updated"))
}

/// PATCH /api/novels/{id}
pub async fn update(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> AppResult<ResourceResponse<Novel>> {
    find(&state, id).await?;
    let input: UpdateNovel = from_body(body)?;
    input.validate().map_err(CoreError::from)?;
    let novel = NovelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found::<Novel>(id))?;
    Ok(Envelope::resource(novel, state.prefix()).with_message("Update successful"))
}

/// DELETE /api/novels/{id}
pub async fn delete(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if NovelRepo::delete(&state.pool, id).await? {
        tracing::info!(novel_id = id, "Novel deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found::<Novel>(id))
    }
}
