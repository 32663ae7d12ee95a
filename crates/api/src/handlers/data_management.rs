//! Handlers for the `/datamanagement` resource.

use axum::extract::State;
use axum::Json;
use dbz_db::repositories::{CatalogRepo, ClearCounts};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Body returned after the store has been wiped.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub counts: ClearCounts,
}

/// DELETE /api/datamanagement/clear
///
/// Delete every transformation, then every character, in one transaction.
/// A failure leaves both tables untouched.
pub async fn clear(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<ClearResponse>> {
    tracing::warn!(user = %user.username, "Clearing all character and transformation data");

    let counts = CatalogRepo::clear_all(&state.pool).await.map_err(|e| {
        AppError::InternalError(format!("Failed to clear catalog data, rolled back: {e}"))
    })?;

    tracing::info!(
        characters = counts.characters_deleted,
        transformations = counts.transformations_deleted,
        "Catalog data cleared"
    );
    Ok(Json(ClearResponse {
        message: "All character and transformation data cleared successfully.",
        counts,
    }))
}
