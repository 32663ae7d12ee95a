//! Extractors whose rejections use the JSON error body.

use axum::extract::FromRequestParts;

use crate::error::AppError;

/// [`axum::extract::Path`] with rejections rendered as `{error, code}`.
///
/// `/api/characters/abc` answers 400 `BAD_REQUEST` instead of axum's
/// plain-text body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);
