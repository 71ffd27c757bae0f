use std::sync::Arc;

use boardgame_swap::infra::config;
use boardgame_swap::{BggClient, CatalogConfig, CatalogSearch, DatabaseService, ListingStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--skip-db] [--query <text>]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL (unless --skip-db)\n\
         Optional:\n\
           BGG_API_BASE_URL, BGG_API_TOKEN, CATALOG_TIMEOUT_SECS, BIND_ADDR, CORS_ORIGIN\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let skip_db = args.iter().any(|a| a == "--skip-db");
    let probe_query = match args.iter().position(|a| a == "--query") {
        Some(i) => match args.get(i + 1) {
            Some(q) => q.clone(),
            None => usage_and_exit(),
        },
        None => "Catan".to_string(),
    };

    let catalog_config = CatalogConfig::from_env();

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config::bind_addr());
    println!("  BGG_API_BASE_URL={}", catalog_config.base_url);
    println!("  CATALOG_TIMEOUT_SECS={}", catalog_config.timeout.as_secs());
    println!(
        "  BGG_API_TOKEN={}",
        if catalog_config.api_token.is_some() { "<set>" } else { "<not set>" }
    );
    println!(
        "  CORS_ORIGIN={}",
        config::cors_origin().unwrap_or_else(|| "<any>".to_string())
    );

    // Database reachability + schema creation
    if skip_db {
        println!("  Skipping database check.");
    } else {
        let db_service = DatabaseService::new().await?;
        db_service.ping().await?;
        let listings = db_service.list_listings().await?;
        println!("  Database reachable, {} listing(s) stored.", listings.len());
    }

    // Catalog round-trip through the same pipeline the API uses
    let catalog = CatalogSearch::new(Arc::new(BggClient::new(catalog_config)?));
    let results = catalog
        .search(&probe_query)
        .await
        .map_err(|e| anyhow::anyhow!("Catalog search for '{}' failed: {}", probe_query, e))?;
    println!("  Catalog search '{}' returned {} result(s).", probe_query, results.len());
    if let Some(top) = results.first() {
        println!(
            "  Top result: {} ({}) rank={}",
            top.name,
            top.id,
            top.rank.map(|r| r.to_string()).unwrap_or_else(|| "unranked".to_string())
        );
    }

    println!("> Preflight OK.");
    Ok(())
}
