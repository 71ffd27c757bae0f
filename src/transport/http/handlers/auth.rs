use crate::domain::listing::User;
use crate::transport::http::handlers::common::require_identity;
use crate::transport::http::types::ApiResponse;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user profile", body = User),
        (status = 401, description = "Not authenticated", body = ApiResponse)
    )
)]
pub async fn me_handler(headers: HeaderMap) -> impl IntoResponse {
    match require_identity(&headers) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(resp) => resp.into_response(),
    }
}
