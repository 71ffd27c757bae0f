pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database_service::DatabaseService;
pub use domain::catalog::{CatalogError, CatalogSearch, CatalogTransport, ErrorKind, GameResult, GameType};
pub use domain::listing::{Listing, ListingStore, NewListing, User};
pub use infra::bgg::BggClient;
pub use infra::config::CatalogConfig;
