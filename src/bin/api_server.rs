// src/bin/api_server.rs

use axum::http::HeaderValue;
use boardgame_swap::infra::config;
use boardgame_swap::transport;
use boardgame_swap::{BggClient, CatalogConfig, CatalogSearch, DatabaseService};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // --- Catalog Client Initialization ---
    let catalog_config = CatalogConfig::from_env();
    log::info!(
        "Catalog provider: {} (timeout {}s, token {})",
        catalog_config.base_url,
        catalog_config.timeout.as_secs(),
        if catalog_config.api_token.is_some() { "set" } else { "not set" }
    );
    let catalog = CatalogSearch::new(Arc::new(BggClient::new(catalog_config)?));

    // --- Service Initialization ---
    log::info!("Initializing DatabaseService...");
    let db_service = DatabaseService::new().await?;
    log::info!("DatabaseService initialized successfully.");

    let app_state = transport::http::AppState {
        catalog,
        store: Arc::new(db_service),
    };

    // --- API Server Initialization ---
    let cors = match config::cors_origin() {
        Some(origin) => CorsLayer::new()
            .allow_origin(HeaderValue::from_str(&origin)?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("API server listening on http://{}", bind_addr);
    log::info!("Swagger UI available at http://{}/swagger-ui", bind_addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("Shutdown signal received (Ctrl+C), stopping.");
        }
    }

    Ok(())
}
