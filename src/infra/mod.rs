pub mod bgg;
pub mod config;
