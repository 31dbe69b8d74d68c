use axum::routing::get;
use axum::Router;

use crate::handlers::novel;
use crate::state::AppState;

/// Routes mounted at `/novels`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> replace
/// PATCH  /{id}              -> update
/// DELETE /{id}              -> delete
/// GET    /{id}/characters   -> list_characters
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(novel::list).post(novel::create))
        .route(
            "/{id}",
            get(novel::get_by_id)
                .put(novel::replace)
                .patch(novel::update)
                .delete(novel::delete),
        )
        .route("/{id}/characters", get(novel::list_characters))
}
