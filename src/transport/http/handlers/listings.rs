use crate::domain::listing::{Listing, NewListing};
use crate::transport::http::handlers::common::require_identity;
use crate::transport::http::types::{json_422, ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/listings",
    responses(
        (status = 200, description = "All listings, newest first", body = Vec<Listing>),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_listings_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_listings().await {
        Ok(listings) => (StatusCode::OK, Json(listings)).into_response(),
        Err(e) => {
            log::error!("Failed to fetch listings: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to fetch listings")),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/listings",
    request_body = NewListing,
    params(
        ("x-user-id" = String, Header, description = "Authenticated user id"),
        ("x-user-email" = String, Header, description = "Authenticated user email"),
        ("x-user-name" = String, Header, description = "Authenticated user display name"),
        ("x-user-photo" = Option<String>, Header, description = "Authenticated user photo URL")
    ),
    responses(
        (status = 201, description = "Listing created", body = Listing),
        (status = 400, description = "Missing required fields", body = ApiResponse),
        (status = 401, description = "User not authenticated", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_listing_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<NewListing>, JsonRejection>,
) -> impl IntoResponse {
    let user = match require_identity(&headers) {
        Ok(u) => u,
        Err(resp) => return resp.into_response(),
    };

    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(
                e,
                "{\"bggId\", \"gameName\", \"condition\", \"price\", \"notes\"?}",
            )
            .into_response();
        }
    };

    let listing = match request.validate() {
        Ok(l) => l,
        Err(msg) => {
            return (StatusCode::BAD_REQUEST, Json(ApiResponse::error(msg))).into_response();
        }
    };

    if let Err(e) = state.store.upsert_user(&user).await {
        log::error!("Failed to record user {}: {}", user.id, e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error("Failed to create listing")),
        )
            .into_response();
    }

    match state.store.create_listing(&user.id, &listing).await {
        Ok(created) => {
            log::info!(
                "Listing {} created by {} for catalog item {}",
                created.id,
                user.id,
                created.bgg_id
            );
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(e) => {
            log::error!("Failed to create listing: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to create listing")),
            )
                .into_response()
        }
    }
}
