use axum::routing::get;
use axum::Router;

use crate::handlers::author;
use crate::state::AppState;

/// Routes mounted at `/authors`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> replace
/// PATCH  /{id}              -> update
/// DELETE /{id}              -> delete
/// GET    /{id}/novels       -> list_novels
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(author::list).post(author::create))
        .route(
            "/{id}",
            get(author::get_by_id)
                .put(author::replace)
                .patch(author::update)
                .delete(author::delete),
        )
        .route("/{id}/novels", get(author::list_novels))
}
