pub mod auth;
pub mod characters;
pub mod data_management;
pub mod health;
pub mod transformations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                login (public)
///
/// /characters                                list (auth required)
/// /characters/{id}                           get
/// /characters/byName/{name}                  substring search
/// /characters/byAffiliation/{affiliation}    exact match
/// /characters/sync                           mirror the catalog (POST)
///
/// /transformations                           list (auth required)
/// /transformations/{id}                      get
///
/// /datamanagement/clear                      wipe both tables (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/characters", characters::router())
        .nest("/transformations", transformations::router())
        .nest("/datamanagement", data_management::router())
}
