//! Handlers for the `/transformations` resource.

use axum::extract::State;
use axum::Json;
use dbz_core::error::CoreError;
use dbz_core::types::DbId;
use dbz_db::models::transformation::Transformation;
use dbz_db::repositories::TransformationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Path;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/transformations
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Transformation>>> {
    let transformations = TransformationRepo::list_all(&state.pool).await?;
    Ok(Json(transformations))
}

/// GET /api/transformations/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Transformation>> {
    let transformation = TransformationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Transformation",
            id,
        }))?;
    Ok(Json(transformation))
}
