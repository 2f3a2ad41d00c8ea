//! Everything outside of the API routes

use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;

use crate::api::Error;

/// Where the root sends visitors
pub const DOCUMENTATION_PATH: &str = "/openapi";

/// The root redirects to the OpenAPI document
pub async fn root() -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, DOCUMENTATION_PATH)])
}

/// All unknown paths end up here
pub async fn fallback() -> Error {
    Error::not_found("Not found")
}
