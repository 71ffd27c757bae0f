//! Shared fixtures: a fake catalog provider and an in-memory listing store.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use boardgame_swap::domain::listing::{Listing, ListingStore, SellerSummary, User, ValidListing};
use boardgame_swap::{transport, BggClient, CatalogConfig, CatalogSearch};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Stand-in for the catalog provider's `/search` and `/thing` endpoints.
pub struct FakeCatalog {
    pub search_xml: String,
    pub thing_xml: String,
    pub search_status: StatusCode,
    pub thing_status: StatusCode,
    pub delay: Option<Duration>,
    pub search_calls: AtomicUsize,
    pub thing_calls: AtomicUsize,
    pub search_params: Mutex<HashMap<String, String>>,
    pub thing_params: Mutex<HashMap<String, String>>,
}

impl FakeCatalog {
    pub fn new(search_xml: impl Into<String>, thing_xml: impl Into<String>) -> Self {
        Self {
            search_xml: search_xml.into(),
            thing_xml: thing_xml.into(),
            search_status: StatusCode::OK,
            thing_status: StatusCode::OK,
            delay: None,
            search_calls: AtomicUsize::new(0),
            thing_calls: AtomicUsize::new(0),
            search_params: Mutex::new(HashMap::new()),
            thing_params: Mutex::new(HashMap::new()),
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn thing_calls(&self) -> usize {
        self.thing_calls.load(Ordering::SeqCst)
    }

    pub fn search_param(&self, key: &str) -> Option<String> {
        self.search_params.lock().unwrap().get(key).cloned()
    }

    pub fn thing_param(&self, key: &str) -> Option<String> {
        self.thing_params.lock().unwrap().get(key).cloned()
    }

    /// Ids the detail endpoint was asked for, in request order.
    pub fn requested_ids(&self) -> Vec<String> {
        self.thing_param("id")
            .map(|ids| ids.split(',').map(str::to_string).collect())
            .unwrap_or_default()
    }
}

async fn fake_search(
    State(fake): State<Arc<FakeCatalog>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.search_calls.fetch_add(1, Ordering::SeqCst);
    *fake.search_params.lock().unwrap() = params;
    if let Some(delay) = fake.delay {
        tokio::time::sleep(delay).await;
    }
    (fake.search_status, fake.search_xml.clone())
}

async fn fake_thing(
    State(fake): State<Arc<FakeCatalog>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.thing_calls.fetch_add(1, Ordering::SeqCst);
    *fake.thing_params.lock().unwrap() = params;
    (fake.thing_status, fake.thing_xml.clone())
}

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

pub async fn spawn_catalog(fake: Arc<FakeCatalog>) -> String {
    let router = Router::new()
        .route("/search", get(fake_search))
        .route("/thing", get(fake_thing))
        .with_state(fake);
    spawn(router).await
}

pub fn catalog_search(base_url: &str, timeout: Duration) -> CatalogSearch {
    let client = BggClient::new(CatalogConfig {
        base_url: base_url.to_string(),
        timeout,
        api_token: None,
    })
    .unwrap();
    CatalogSearch::new(Arc::new(client))
}

/// Starts the API against the given fake catalog and store, returning its base URL.
pub async fn spawn_app(fake: Arc<FakeCatalog>, store: Arc<dyn ListingStore>) -> String {
    let catalog_url = spawn_catalog(fake).await;
    let app_state = transport::http::AppState {
        catalog: catalog_search(&catalog_url, Duration::from_secs(5)),
        store,
    };
    spawn(transport::http::create_router(app_state)).await
}

/// Search response listing `ids` in order.
pub fn search_xml(ids: &[&str]) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<item type="boardgame" id="{id}"><name type="primary" value="Game {id}"/></item>"#
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><items total="{}" termsofuse="https://boardgamegeek.com/xmlapi/termsofuse">{}</items>"#,
        ids.len(),
        items
    )
}

#[derive(Default)]
pub struct MemoryListingStore {
    pub users: Mutex<Vec<User>>,
    pub listings: Mutex<Vec<Listing>>,
    pub unhealthy: AtomicBool,
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn ping(&self) -> anyhow::Result<()> {
        if self.unhealthy.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> anyhow::Result<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        Ok(())
    }

    async fn create_listing(&self, seller_id: &str, listing: &ValidListing) -> anyhow::Result<Listing> {
        let mut listings = self.listings.lock().unwrap();
        let created = Listing {
            id: listings.len() as i64 + 1,
            bgg_id: listing.bgg_id.clone(),
            game_name: listing.game_name.clone(),
            condition: listing.condition.clone(),
            price: listing.price,
            notes: listing.notes.clone(),
            seller_id: seller_id.to_string(),
            created_at: chrono::Utc::now(),
            seller: None,
        };
        listings.push(created.clone());
        Ok(created)
    }

    async fn list_listings(&self) -> anyhow::Result<Vec<Listing>> {
        let users = self.users.lock().unwrap();
        let listings = self.listings.lock().unwrap();
        Ok(listings
            .iter()
            .rev()
            .map(|l| {
                let mut l = l.clone();
                l.seller = users.iter().find(|u| u.id == l.seller_id).map(|u| SellerSummary {
                    name: u.name.clone(),
                    photo: u.photo.clone(),
                });
                l
            })
            .collect())
    }
}
