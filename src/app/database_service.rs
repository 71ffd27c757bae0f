//! Postgres-backed store for marketplace users and listings.
//!
//! Tables are created on startup if they do not exist yet:
//! 1.  `users`, keyed by the identity provider's subject id.
//! 2.  `listings`, each referencing its seller in `users`.

use crate::domain::listing::{Listing, ListingStore, SellerSummary, User, ValidListing};
use crate::infra::config;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

/// The main service that manages database interaction.
pub struct DatabaseService {
    pool: PgPool,
}

impl DatabaseService {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates a new instance of the DatabaseService and connects to the database.
    pub async fn new() -> Result<Self, anyhow::Error> {
        dotenv::dotenv().ok();
        let database_url = config::database_url()?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;

        Self::with_pool(pool).await
    }

    /// Wraps an existing pool, creating the schema if needed.
    pub async fn with_pool(pool: PgPool) -> Result<Self, anyhow::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                photo TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS listings (
                id BIGSERIAL PRIMARY KEY,
                bgg_id TEXT NOT NULL,
                game_name TEXT NOT NULL,
                condition TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL,
                notes TEXT,
                seller_id TEXT NOT NULL REFERENCES users(id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS listings_created_at_idx ON listings (created_at DESC)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

fn listing_from_row(row: &PgRow) -> anyhow::Result<Listing> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(Listing {
        id: row.try_get("id")?,
        bgg_id: row.try_get("bgg_id")?,
        game_name: row.try_get("game_name")?,
        condition: row.try_get("condition")?,
        price: row.try_get("price")?,
        notes: row.try_get("notes")?,
        seller_id: row.try_get("seller_id")?,
        created_at,
        seller: None,
    })
}

#[async_trait]
impl ListingStore for DatabaseService {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, photo)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name, email = EXCLUDED.email, photo = EXCLUDED.photo",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.photo)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn create_listing(
        &self,
        seller_id: &str,
        listing: &ValidListing,
    ) -> anyhow::Result<Listing> {
        let row = sqlx::query(
            "INSERT INTO listings (bgg_id, game_name, condition, price, notes, seller_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, bgg_id, game_name, condition, price, notes, seller_id, created_at",
        )
        .bind(&listing.bgg_id)
        .bind(&listing.game_name)
        .bind(&listing.condition)
        .bind(listing.price)
        .bind(&listing.notes)
        .bind(seller_id)
        .fetch_one(&self.pool)
        .await?;

        listing_from_row(&row)
    }

    async fn list_listings(&self) -> anyhow::Result<Vec<Listing>> {
        let rows = sqlx::query(
            "SELECT l.id, l.bgg_id, l.game_name, l.condition, l.price, l.notes, l.seller_id,
                    l.created_at, u.name AS seller_name, u.photo AS seller_photo
             FROM listings l
             JOIN users u ON u.id = l.seller_id
             ORDER BY l.created_at DESC, l.id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> anyhow::Result<Listing> {
                let mut listing = listing_from_row(row)?;
                listing.seller = Some(SellerSummary {
                    name: row.try_get("seller_name")?,
                    photo: row.try_get("seller_photo")?,
                });
                Ok(listing)
            })
            .collect()
    }
}
