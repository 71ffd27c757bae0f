//! Marketplace users and their for-sale listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A marketplace user, keyed by the identity provider's stable subject id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Public part of a seller shown next to each listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SellerSummary {
    pub name: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: i64,
    /// Catalog id of the game being sold.
    pub bgg_id: String,
    pub game_name: String,
    pub condition: String,
    pub price: f64,
    pub notes: Option<String>,
    pub seller_id: String,
    pub created_at: DateTime<Utc>,
    /// Present when listings are read back with their seller joined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerSummary>,
}

/// Body of a create-listing request.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    #[serde(default)]
    pub bgg_id: Option<String>,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A `NewListing` that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidListing {
    pub bgg_id: String,
    pub game_name: String,
    pub condition: String,
    pub price: f64,
    pub notes: Option<String>,
}

impl NewListing {
    /// Checks required fields. Text fields must be non-blank and the price a
    /// finite, non-negative number. Blank notes are dropped.
    pub fn validate(&self) -> Result<ValidListing, String> {
        let required = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let (Some(bgg_id), Some(game_name), Some(condition), Some(price)) = (
            required(&self.bgg_id),
            required(&self.game_name),
            required(&self.condition),
            self.price,
        ) else {
            return Err("Missing required fields".to_string());
        };

        if !price.is_finite() || price < 0.0 {
            return Err(format!("Invalid price: {}", price));
        }

        Ok(ValidListing {
            bgg_id,
            game_name,
            condition,
            price,
            notes: required(&self.notes),
        })
    }
}

/// Persistence for users and listings.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> anyhow::Result<()>;

    /// Inserts the user or refreshes name, email and photo of an existing one.
    async fn upsert_user(&self, user: &User) -> anyhow::Result<()>;

    async fn create_listing(&self, seller_id: &str, listing: &ValidListing) -> anyhow::Result<Listing>;

    /// All listings, newest first, each with its seller summary.
    async fn list_listings(&self) -> anyhow::Result<Vec<Listing>>;
}
