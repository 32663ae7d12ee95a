//! Handlers for the `/characters` resource.
//!
//! Every handler requires a bearer token. Characters are returned with
//! their transformations nested.

use axum::extract::State;
use axum::Json;
use dbz_core::error::CoreError;
use dbz_core::types::DbId;
use dbz_db::models::character::CharacterWithTransformations;
use dbz_db::repositories::CharacterRepo;
use dbz_sync::SyncReport;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::Path;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Body returned by a successful sync run.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub message: String,
    pub characters: usize,
    pub transformations: usize,
}

impl From<SyncReport> for SyncResponse {
    fn from(report: SyncReport) -> Self {
        let (characters, transformations) = match report {
            SyncReport::NothingToSave => (0, 0),
            SyncReport::Saved {
                characters,
                transformations,
            } => (characters, transformations),
        };
        Self {
            message: report.to_string(),
            characters,
            transformations,
        }
    }
}

/// GET /api/characters
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CharacterWithTransformations>>> {
    let characters = CharacterRepo::list_all(&state.pool).await?;
    Ok(Json(characters))
}

/// GET /api/characters/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharacterWithTransformations>> {
    let character = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(character))
}

/// GET /api/characters/byName/{name}
///
/// Case-insensitive substring match. `%` and `_` in `name` match literally.
pub async fn by_name(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<CharacterWithTransformations>>> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name parameter cannot be empty.".into(),
        )));
    }

    let characters = CharacterRepo::search_by_name(&state.pool, &name).await?;
    if characters.is_empty() {
        return Err(AppError::Core(CoreError::NoResults(format!(
            "No characters found matching the name '{name}'."
        ))));
    }
    Ok(Json(characters))
}

/// GET /api/characters/byAffiliation/{affiliation}
pub async fn by_affiliation(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(affiliation): Path<String>,
) -> AppResult<Json<Vec<CharacterWithTransformations>>> {
    if affiliation.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Affiliation parameter cannot be empty.".into(),
        )));
    }

    let characters = CharacterRepo::list_by_affiliation(&state.pool, &affiliation).await?;
    if characters.is_empty() {
        return Err(AppError::Core(CoreError::NoResults(format!(
            "No characters found with the affiliation '{affiliation}'."
        ))));
    }
    Ok(Json(characters))
}

/// POST /api/characters/sync
///
/// Mirror the external catalog into an empty store. Runs to completion
/// inside the request.
pub async fn sync(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<SyncResponse>> {
    tracing::info!(user = %user.username, "Synchronization requested");
    let report = state.synchronizer.synchronize().await?;
    Ok(Json(report.into()))
}
