use crate::domain::catalog::{GameResult, GameType};
use crate::domain::listing::{Listing, NewListing, SellerSummary, User};
use crate::transport::http::handlers::{auth, health, listings, search};
use crate::transport::http::types::ApiResponse;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        search::search_handler,
        listings::list_listings_handler,
        listings::create_listing_handler,
        auth::me_handler
    ),
    components(schemas(
        ApiResponse,
        GameResult,
        GameType,
        Listing,
        NewListing,
        SellerSummary,
        User
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::healthcheck_handler))
        .route("/api/bgg/search", get(search::search_handler))
        .route(
            "/api/listings",
            get(listings::list_listings_handler).post(listings::create_listing_handler),
        )
        .route("/api/auth/me", get(auth::me_handler))
        .with_state(app_state)
}
