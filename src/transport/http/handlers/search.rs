use crate::domain::catalog::{ErrorKind, GameResult};
use crate::transport::http::types::{ApiResponse, AppState, SearchParams};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/bgg/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching games, best ranked first", body = Vec<GameResult>),
        (status = 400, description = "Missing or empty query", body = ApiResponse),
        (status = 500, description = "Catalog provider unavailable", body = ApiResponse)
    )
)]
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let query = params.query.unwrap_or_default();

    match state.catalog.search(&query).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => match e.kind() {
            ErrorKind::InvalidInput => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e.to_string())),
            )
                .into_response(),
            ErrorKind::UpstreamUnavailable => {
                log::error!("Catalog search for '{}' failed: {}", query, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Failed to fetch data from BGG API")),
                )
                    .into_response()
            }
        },
    }
}
