use crate::domain::listing::User;
use crate::transport::http::types::{
    ApiResponse, USER_EMAIL_HEADER, USER_ID_HEADER, USER_NAME_HEADER, USER_PHOTO_HEADER,
};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Reads the authenticated user from the identity headers.
///
/// Id, email and name are all required; photo is optional.
pub fn identity_from_headers(headers: &HeaderMap) -> Option<User> {
    Some(User {
        id: header_value(headers, USER_ID_HEADER)?,
        email: header_value(headers, USER_EMAIL_HEADER)?,
        name: header_value(headers, USER_NAME_HEADER)?,
        photo: header_value(headers, USER_PHOTO_HEADER),
    })
}

pub fn require_identity(headers: &HeaderMap) -> Result<User, (StatusCode, Json<ApiResponse>)> {
    identity_from_headers(headers).ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("User not authenticated")),
        )
    })
}
