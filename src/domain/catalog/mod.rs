//! Catalog search: turns a free-text query into ranked, normalized game records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod aggregator;
pub mod error;
pub mod normalize;

pub use aggregator::{CatalogSearch, MAX_CANDIDATES};
pub use error::{CatalogError, ErrorKind};

/// Access to the two endpoints of the external catalog provider.
///
/// Implementations return the raw XML body of a successful (2xx) response.
/// Anything else, including timeouts, must surface as a `CatalogError`.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Free-text search restricted to board games and expansions.
    async fn search(&self, query: &str) -> Result<String, CatalogError>;

    /// Detail lookup (with statistics) for the given ids in a single request.
    async fn thing(&self, ids: &[String]) -> Result<String, CatalogError>;
}

/// One `<item>` of the search response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSearchHit {
    pub id: String,
    pub raw_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum GameType {
    #[serde(rename = "boardgame")]
    BoardGame,
    #[serde(rename = "boardgameexpansion")]
    Expansion,
}

impl GameType {
    pub fn from_provider(raw: &str) -> Option<Self> {
        match raw.trim() {
            "boardgame" => Some(GameType::BoardGame),
            "boardgameexpansion" => Some(GameType::Expansion),
            _ => None,
        }
    }
}

/// A normalized catalog record, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GameResult {
    pub id: String,
    /// Primary display name, `"N/A"` when the provider has none.
    pub name: String,
    #[serde(rename = "type")]
    pub game_type: GameType,
    pub yearpublished: Option<String>,
    pub image: Option<String>,
    /// Overall "boardgame" popularity rank, `None` when unranked.
    pub rank: Option<u32>,
}
