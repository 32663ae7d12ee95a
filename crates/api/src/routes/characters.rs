use axum::routing::{get, post};
use axum::Router;

use crate::handlers::characters;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET    /                            -> list
/// GET    /{id}                        -> get_by_id
/// GET    /byName/{name}               -> by_name
/// GET    /byAffiliation/{affiliation} -> by_affiliation
/// POST   /sync                        -> sync
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(characters::list))
        .route("/{id}", get(characters::get_by_id))
        .route("/byName/{name}", get(characters::by_name))
        .route("/byAffiliation/{affiliation}", get(characters::by_affiliation))
        .route("/sync", post(characters::sync))
}
