pub mod author;
pub mod character;
pub mod health;
pub mod novel;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree, mounted under the configured API prefix.
///
/// Route hierarchy:
///
/// ```text
/// /authors                       list, create
/// /authors/{id}                  get, replace, update, delete
/// /authors/{id}/novels           novels by the author
///
/// /novels                        list, create
/// /novels/{id}                   get, replace, update, delete
/// /novels/{id}/characters        characters in the novel
///
/// /characters                    list, create
/// /characters/{id}               get, replace, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/authors", author::router())
        .nest("/novels", novel::router())
        .nest("/characters", character::router())
}
