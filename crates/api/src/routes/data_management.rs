use axum::routing::delete;
use axum::Router;

use crate::handlers::data_management;
use crate::state::AppState;

/// Routes mounted at `/datamanagement`.
///
/// ```text
/// DELETE /clear    -> clear
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/clear", delete(data_management::clear))
}
