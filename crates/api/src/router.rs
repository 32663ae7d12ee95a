//! The catalog service's HTTP surface in one place.
//!
//! `main.rs` and `tests/common/mod.rs` both call [`build_app_router`], so the
//! tests exercise the exact layers production runs with.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Mount `/health` and the `/api` tree, then wrap them in the middleware
/// stack (outermost first):
///
/// | Layer            | Effect                                                        |
/// |------------------|---------------------------------------------------------------|
/// | CORS             | only `cors_origins`; GET, POST and DELETE are all the API uses |
/// | set request id   | UUID in `x-request-id` when the caller sent none              |
/// | trace            | one INFO span per request, carrying the request id header     |
/// | propagate id     | echo `x-request-id` on every response, errors included        |
/// | timeout          | 408 after `request_timeout_secs`; `POST /api/characters/sync` runs inside this budget |
/// | catch panic      | a panicking handler becomes a 500 instead of a dropped connection |
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let sync_budget = Duration::from_secs(config.request_timeout_secs);

    let catalog_service = Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes());

    catalog_service
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            sync_budget,
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// CORS for the browser clients listed in `CORS_ORIGINS`.
///
/// Clients send `Authorization: Bearer` and JSON login bodies, so those two
/// headers are allowed. An unparsable origin panics at startup.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{o}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
