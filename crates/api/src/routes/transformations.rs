use axum::routing::get;
use axum::Router;

use crate::handlers::transformations;
use crate::state::AppState;

/// Routes mounted at `/transformations`.
///
/// ```text
/// GET    /        -> list
/// GET    /{id}    -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(transformations::list))
        .route("/{id}", get(transformations::get_by_id))
}
