//! Handlers for the `/authors` resource.
//!
//! `/authors[/{id}]` plus the `/authors/{id}/novels` sub-collection.

use axum::extract::State;
use axum::http::StatusCode;
use fabula_core::error::CoreError;
use fabula_core::types::DbId;
use fabula_db::models::author::{Author, CreateAuthor, ReplaceAuthor, UpdateAuthor};
use fabula_db::models::novel::Novel;
use fabula_db::repositories::{AuthorRepo, NovelRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{from_body, ApiJson, ApiPath};
use crate::middleware::auth::WriteAccess;
use crate::response::{CollectionResponse, Envelope, ResourceResponse};
use crate::state::AppState;

async fn find(state: &AppState, id: DbId) -> AppResult<Author> {
    AuthorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found::<Author>(id))
}

/// GET /api/authors
pub async fn list(State(state): State<AppState>) -> AppResult<CollectionResponse<Author>> {
    let authors = AuthorRepo::list(&state.pool).await?;
    Ok(Envelope::collection(authors, state.prefix()))
}

/// GET /api/authors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<ResourceResponse<Author>> {
    let author = find(&state, id).await?;
    Ok(Envelope::resource(author, state.prefix()))
}

/// GET /api/authors/{id}/novels
pub async fn list_novels(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<CollectionResponse<Novel>> {
    let author = find(&state, id).await?;
    let novels = NovelRepo::list_by_author(&state.pool, author.id).await?;
    Ok(Envelope::collection(novels, state.prefix()))
}

/// POST /api/authors
pub async fn create(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiJson(input): ApiJson<CreateAuthor>,
) -> AppResult<ResourceResponse<Author>> {
    input.validate().map_err(CoreError::from)?;
    let author = AuthorRepo::create(&state.pool, &input).await?;
    tracing::info!(author_id = author.id, "Author created");
    Ok(Envelope::created(author, state.prefix()).with_message("Author was successfully created"))
}

/// PUT /api/authors/{id}
///
/// Every updatable field must be present; otherwise 400.
pub async fn replace(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> AppResult<ResourceResponse<Author>> {
    find(&state, id).await?;
    let input: ReplaceAuthor = from_body(body)?;
    input.validate().map_err(|_| AppError::incomplete_payload())?;

    let input = UpdateAuthor::from(input);
    input.validate().map_err(CoreError::from)?;
    let author = AuthorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found::<Author>(id))?;
    Ok(Envelope::resource(author, state.prefix()).with_message("Author successfully updated"))
}

/// PATCH /api/authors/{id}
pub async fn update(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> AppResult<ResourceResponse<Author>> {
    find(&state, id).await?;
    let input: UpdateAuthor = from_body(body)?;
    input.validate().map_err(CoreError::from)?;
    let author = AuthorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found::<Author>(id))?;
    Ok(Envelope::resource(author, state.prefix()).with_message("Update successful"))
}

/// DELETE /api/authors/{id}
///
/// Novels by the author are kept and detached.
pub async fn delete(
    State(state): State<AppState>,
    _access: WriteAccess,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if AuthorRepo::delete(&state.pool, id).await? {
        tracing::info!(author_id = id, "Author deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found::<Author>(id))
    }
}
