//! Listing, identity and health endpoints against an in-memory store.

mod common;

use common::{spawn_app, FakeCatalog, MemoryListingStore};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn with_identity(request: reqwest::RequestBuilder, id: &str, name: &str) -> reqwest::RequestBuilder {
    request
        .header("x-user-id", id)
        .header("x-user-email", format!("{}@example.com", id))
        .header("x-user-name", name)
        .header("x-user-photo", format!("https://img.example.com/{}.png", id))
}

async fn start(store: Arc<MemoryListingStore>) -> String {
    let fake = Arc::new(FakeCatalog::new("<items total=\"0\"></items>", "<items></items>"));
    spawn_app(fake, store).await
}

#[tokio::test]
async fn create_listing_requires_identity() {
    let store = Arc::new(MemoryListingStore::default());
    let base_url = start(store.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{}/api/listings", base_url))
        .json(&json!({ "bggId": "13", "gameName": "CATAN", "condition": "Good", "price": 20 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "User not authenticated");
    assert!(store.listings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_listing_rejects_missing_fields() {
    let store = Arc::new(MemoryListingStore::default());
    let base_url = start(store.clone()).await;
    let client = reqwest::Client::new();

    let resp = with_identity(client.post(format!("{}/api/listings", base_url)), "u1", "Ana")
        .json(&json!({ "bggId": "13", "gameName": "CATAN" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Missing required fields");
    assert!(store.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_listing_rejects_non_json_body() {
    let base_url = start(Arc::new(MemoryListingStore::default())).await;
    let client = reqwest::Client::new();

    let resp = with_identity(client.post(format!("{}/api/listings", base_url)), "u1", "Ana")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn created_listings_are_listed_newest_first_with_seller() {
    let store = Arc::new(MemoryListingStore::default());
    let base_url = start(store.clone()).await;
    let client = reqwest::Client::new();

    let resp = with_identity(client.post(format!("{}/api/listings", base_url)), "u1", "Ana")
        .json(&json!({
            "bggId": "13",
            "gameName": "CATAN",
            "condition": "Like New",
            "price": 25.5,
            "notes": "Sleeved cards"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["bggId"], "13");
    assert_eq!(created["gameName"], "CATAN");
    assert_eq!(created["price"], 25.5);
    assert_eq!(created["notes"], "Sleeved cards");
    assert_eq!(created["sellerId"], "u1");

    let resp = with_identity(client.post(format!("{}/api/listings", base_url)), "u2", "Ben")
        .json(&json!({ "bggId": "822", "gameName": "Carcassonne", "condition": "Used", "price": 12 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);

    let listings: Value = client
        .get(format!("{}/api/listings", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listings = listings.as_array().unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0]["gameName"], "Carcassonne");
    assert_eq!(listings[0]["seller"]["name"], "Ben");
    assert!(listings[0]["notes"].is_null());
    assert_eq!(listings[1]["gameName"], "CATAN");
    assert_eq!(listings[1]["seller"]["name"], "Ana");
    assert_eq!(listings[1]["seller"]["photo"], "https://img.example.com/u1.png");

    assert_eq!(store.users.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn me_reflects_identity_headers() {
    let base_url = start(Arc::new(MemoryListingStore::default())).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/api/auth/me", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);

    let me: Value = with_identity(client.get(format!("{}/api/auth/me", base_url)), "u9", "Cleo")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["id"], "u9");
    assert_eq!(me["email"], "u9@example.com");
    assert_eq!(me["name"], "Cleo");
}

#[tokio::test]
async fn health_follows_store_ping() {
    let store = Arc::new(MemoryListingStore::default());
    let base_url = start(store.clone()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/health", base_url)).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "ok");

    store.unhealthy.store(true, Ordering::SeqCst);
    let resp = client.get(format!("{}/health", base_url)).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 503);
}

#[tokio::test]
async fn root_banner() {
    let base_url = start(Arc::new(MemoryListingStore::default())).await;
    let text = reqwest::get(format!("{}/", base_url))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(text, "Board Game Swap API is running!");
}
